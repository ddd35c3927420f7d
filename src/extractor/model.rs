use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;

static SPACE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static NEWLINE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Readable article returned by `GET /api/article`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedArticle {
    pub title: String,
    /// Sanitized article HTML with absolute links.
    pub content: String,
    pub text_content: String,
    pub excerpt: String,
    pub byline: Option<String>,
    /// `"ltr"` or `"rtl"` when the page declares it.
    pub dir: Option<String>,
    pub site_name: Option<String>,
    pub lang: Option<String>,
}

/// Output of the content-region pass, before sanitizing and metadata.
#[derive(Debug)]
pub struct ReadabilityResult {
    pub title: String,
    pub text: String,
    pub html: String,
}

pub fn normalize_whitespace(text: &str) -> String {
    let spaced = SPACE_RUN_REGEX.replace_all(text.trim(), " ");
    NEWLINE_RUN_REGEX.replace_all(&spaced, "\n\n").to_string()
}

/// First `max_chars` characters of `text`, cut back to a word boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => {
            let head = &text[..cut];
            let head = head
                .rfind(char::is_whitespace)
                .map(|pos| &head[..pos])
                .unwrap_or(head);
            format!("{}…", head.trim_end())
        }
    }
}
