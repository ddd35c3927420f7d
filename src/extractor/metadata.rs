//! Article metadata read from the page head and markup.
//!
//! Readability only hands back title, text and HTML, so the byline,
//! excerpt, site name, text direction and language come from here.

use scraper::{Html, Selector};

use crate::extractor::model::{normalize_whitespace, truncate_chars};

const MAX_BYLINE_CHARS: usize = 100;
const MAX_EXCERPT_CHARS: usize = 200;
const TITLE_SEPARATORS: [&str; 4] = [" | ", " - ", " – ", " — "];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub site_name: Option<String>,
    pub byline: Option<String>,
    pub description: Option<String>,
    pub dir: Option<String>,
    pub lang: Option<String>,
}

pub fn read_metadata(document: &Html) -> PageMetadata {
    PageMetadata {
        site_name: site_name(document),
        byline: byline(document),
        description: description(document),
        dir: text_direction(document),
        lang: first_attr(document, "html", "lang"),
    }
}

/// Trimmed, non-empty value of `attr` on the first element matching `css`.
fn first_attr(document: &Html, css: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn first_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .map(|element| normalize_whitespace(&element.text().collect::<String>()))
        .find(|text| !text.is_empty())
}

fn site_name(document: &Html) -> Option<String> {
    if let Some(name) = first_attr(document, "meta[property='og:site_name']", "content") {
        return Some(name);
    }

    // "Article Title - Site Name" or "Article Title | Site Name"
    let title = first_text(document, "title")?;
    TITLE_SEPARATORS.iter().find_map(|sep| {
        title
            .rfind(sep)
            .map(|pos| title[pos + sep.len()..].trim().to_string())
            .filter(|name| !name.is_empty())
    })
}

fn byline(document: &Html) -> Option<String> {
    let candidate = first_attr(document, "meta[name='author']", "content")
        .or_else(|| {
            // article:author is frequently a profile URL rather than a name
            first_attr(document, "meta[property='article:author']", "content")
                .filter(|author| !author.starts_with("http"))
        })
        .or_else(|| first_text(document, "[rel='author']"))
        .or_else(|| first_text(document, "[itemprop='author']"))
        .or_else(|| first_text(document, ".byline"))
        .or_else(|| first_text(document, ".author"))?;

    let byline = candidate
        .trim_start_matches("By ")
        .trim_start_matches("by ")
        .trim()
        .to_string();
    if byline.is_empty() || byline.chars().count() > MAX_BYLINE_CHARS {
        return None;
    }
    Some(byline)
}

fn description(document: &Html) -> Option<String> {
    first_attr(document, "meta[name='description']", "content")
        .or_else(|| first_attr(document, "meta[property='og:description']", "content"))
        .or_else(|| first_attr(document, "meta[name='twitter:description']", "content"))
}

fn text_direction(document: &Html) -> Option<String> {
    first_attr(document, "html", "dir")
        .or_else(|| first_attr(document, "body", "dir"))
        .map(|dir| dir.to_ascii_lowercase())
        .filter(|dir| dir == "ltr" || dir == "rtl")
}

/// Drop a trailing " | Site Name" style suffix when what remains still
/// reads like a headline.
pub fn clean_title(raw: &str) -> String {
    let raw = normalize_whitespace(raw).replace('\n', " ");
    let split = TITLE_SEPARATORS
        .iter()
        .filter_map(|sep| raw.rfind(sep))
        .max();

    match split {
        Some(pos) => {
            let head = raw[..pos].trim();
            if head.split_whitespace().count() >= 3 {
                head.to_string()
            } else {
                raw
            }
        }
        None => raw,
    }
}

/// Page description, else the first paragraph of the cleaned content, else
/// the start of the text.
pub fn excerpt(description: Option<&str>, content_html: &str, text: &str) -> String {
    if let Some(description) = description {
        return truncate_chars(&normalize_whitespace(description), MAX_EXCERPT_CHARS);
    }

    let fragment = Html::parse_fragment(content_html);
    let first_paragraph = Selector::parse("p").ok().and_then(|selector| {
        fragment
            .select(&selector)
            .map(|p| normalize_whitespace(&p.text().collect::<String>()))
            .find(|p| !p.is_empty())
    });

    let source = first_paragraph.unwrap_or_else(|| normalize_whitespace(text));
    truncate_chars(&source, MAX_EXCERPT_CHARS)
}
