use readability::extractor;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;
use url::Url;

use crate::extractor::{model::ReadabilityResult, reject::MIN_CONTENT_LENGTH};

/// Selectors tried, in order, when the readability scorer finds nothing.
const CONTENT_SELECTORS: [&str; 11] = [
    "article",
    "main",
    "[role='main']",
    "[itemprop='articleBody']",
    ".article-body",
    ".entry-content",
    ".post-content",
    ".content",
    ".post",
    "#content",
    "#main",
];

/// Elements whose text never counts as article text.
const SKIPPED_ELEMENTS: [&str; 9] = [
    "script", "style", "noscript", "nav", "aside", "footer", "form", "template", "iframe",
];

/// Locate the main content region of `html`.
///
/// The readability scorer runs first. Its output is only trusted when it
/// produced text; otherwise a selector walk over well-known content
/// containers takes over.
pub fn extract(html: &str, document: &Html, url: &Url) -> Option<ReadabilityResult> {
    match extractor::extract(&mut html.as_bytes(), url) {
        Ok(article) if !article.text.trim().is_empty() => {
            let title = if article.title.trim().is_empty() {
                fallback_title(document).unwrap_or_default()
            } else {
                article.title.trim().to_string()
            };
            return Some(ReadabilityResult {
                title,
                text: article.text,
                html: article.content,
            });
        }
        Ok(_) => debug!("Readability produced no text, trying selector fallback"),
        Err(e) => debug!(error = ?e, "Readability failed, trying selector fallback"),
    }

    fallback_extract(document)
}

fn fallback_extract(document: &Html) -> Option<ReadabilityResult> {
    let (text, html) = extract_main_content(document)?;

    Some(ReadabilityResult {
        title: fallback_title(document).unwrap_or_default(),
        text,
        html,
    })
}

/// `og:title`, then `<title>`, then the first `<h1>`.
pub fn fallback_title(document: &Html) -> Option<String> {
    if let Ok(selector) = Selector::parse("meta[property='og:title']") {
        let og_title = document
            .select(&selector)
            .filter_map(|element| element.value().attr("content"))
            .map(str::trim)
            .find(|content| !content.is_empty());
        if let Some(title) = og_title {
            return Some(title.to_string());
        }
    }

    ["title", "h1"].into_iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        document
            .select(&selector)
            .map(|element| element.text().collect::<String>().trim().to_string())
            .find(|title| !title.is_empty())
    })
}

fn extract_main_content(document: &Html) -> Option<(String, String)> {
    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = visible_text(element);
            if text.trim().chars().count() >= MIN_CONTENT_LENGTH {
                return Some((text, element.inner_html()));
            }
        }
    }

    // Last resort: the whole body, minus boilerplate elements
    let body_selector = Selector::parse("body").ok()?;
    let body = document.select(&body_selector).next()?;
    let text = visible_text(body);
    if text.trim().is_empty() {
        return None;
    }
    Some((text, body.inner_html()))
}

/// Text of `element`, skipping scripts, navigation and similar chrome.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if !skipped {
            text.push_str(fragment);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_fallback_title_prefers_og_title() {
        let doc = parse(
            r#"<html><head><meta property="og:title" content="Garden Vows"><title>Garden Vows | Bridal Times</title></head><body><h1>Heading</h1></body></html>"#,
        );
        assert_eq!(fallback_title(&doc), Some("Garden Vows".to_string()));
    }

    #[test]
    fn test_fallback_title_uses_h1_when_no_title() {
        let doc = parse("<html><head></head><body><h1> A June Wedding </h1></body></html>");
        assert_eq!(fallback_title(&doc), Some("A June Wedding".to_string()));
    }

    #[test]
    fn test_visible_text_skips_scripts_and_nav() {
        let doc = parse(
            "<html><body><nav>Home About</nav><p>Vows were read.</p><script>var x = 1;</script></body></html>",
        );
        let selector = Selector::parse("body").unwrap();
        let body = doc.select(&selector).next().unwrap();
        assert_eq!(visible_text(body), "Vows were read.");
    }

    #[test]
    fn test_main_content_prefers_article() {
        let paragraph = "The couple exchanged vows beneath an arch of white peonies. ".repeat(4);
        let html = format!(
            "<html><body><div class='sidebar'>Trending</div><article><p>{}</p></article></body></html>",
            paragraph
        );
        let doc = parse(&html);
        let (text, html) = extract_main_content(&doc).unwrap();
        assert!(text.contains("arch of white peonies"));
        assert!(!text.contains("Trending"));
        assert!(html.starts_with("<p>"));
    }

    #[test]
    fn test_empty_body_yields_nothing() {
        let doc = parse("<html><body>   <script>track()</script></body></html>");
        assert!(extract_main_content(&doc).is_none());
    }
}
