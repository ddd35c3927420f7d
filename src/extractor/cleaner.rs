use ammonia::Builder;
use regex::{Captures, Regex};
use scraper::Html;
use std::sync::LazyLock;
use url::Url;

use crate::extractor::model::{ReadabilityResult, normalize_whitespace};

/// Removed together with everything inside them.
static BOILERPLATE_TAGS: [&str; 5] = ["nav", "aside", "footer", "form", "noscript"];

static LINK_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\b(href|src)="([^"]+)""#).unwrap());

/// Block-level tags; their boundaries separate words in the plain text.
static BLOCK_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(p|div|section|article|main|header|h[1-6]|li|ul|ol|dl|dt|dd|blockquote|pre|figure|figcaption|table|tr|td|th|br|hr)\b[^>]*>").unwrap()
});

pub fn sanitize_and_resolve_links(result: &mut ReadabilityResult, base_url: &Url) {
    // Ammonia drops scripts, styles and event handlers; the boilerplate
    // containers are taken out of the allow-list so their content goes too.
    let clean_html = Builder::default()
        .rm_tags(BOILERPLATE_TAGS.iter())
        .add_clean_content_tags(BOILERPLATE_TAGS.iter())
        .clean(&result.html)
        .to_string();

    result.html = resolve_links(&clean_html, base_url);
    result.text = plain_text(&result.html);
}

/// Text of sanitized HTML, so `text` never holds what `html` dropped.
fn plain_text(html: &str) -> String {
    let spaced = BLOCK_TAG_REGEX.replace_all(html, " $0 ");
    let fragment = Html::parse_fragment(&spaced);
    normalize_whitespace(&fragment.root_element().text().collect::<String>())
}

fn resolve_links(html: &str, base_url: &Url) -> String {
    LINK_ATTR_REGEX
        .replace_all(html, |caps: &Captures| {
            // Ammonia escapes '&' in attributes; undo it before joining
            let raw = caps[2].replace("&amp;", "&");
            match base_url.join(&raw) {
                Ok(absolute) => format!(
                    r#"{}="{}""#,
                    &caps[1],
                    absolute.as_str().replace('&', "&amp;")
                ),
                Err(_) => caps[0].to_string(),
            }
        })
        .into_owned()
}
