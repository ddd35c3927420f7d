use reqwest::StatusCode;
use std::fs;
use url::Url;

use crate::extractor::{ExtractionError, extract};
use crate::fetcher::types::{Charset, PageResponse};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{}", name))
        .expect("Failed to read test fixture")
}

#[test]
fn test_extract_article() {
    let response = create_test_response(fixture("article.html"), "https://example.com/article");
    let article = extract(&response).expect("article should extract");

    assert_eq!(article.title, "Sample Wedding Article");
    assert_eq!(article.site_name.as_deref(), Some("News Site"));
    assert_eq!(article.byline.as_deref(), Some("Maria Lopez"));
    assert_eq!(article.lang.as_deref(), Some("en"));
    assert!(article.text_content.contains("first paragraph"));
    assert!(article.text_content.contains("second paragraph"));
    assert!(article.excerpt.starts_with("This is the first paragraph"));

    assert!(!article.content.is_empty());
    assert!(!article.content.contains("<script"));
    assert!(!article.content.contains("<style"));
    assert!(!article.content.contains("<nav"));
    assert!(!article.text_content.contains("tracking pixel"));

    // Relative links resolve against the page URL
    assert!(article.content.contains("https://example.com/related"));
    assert!(
        article
            .content
            .contains("https://example.com/images/sample.jpg")
    );
}

#[test]
fn test_extract_blog_post() {
    let response = create_test_response(fixture("blog.html"), "https://blog.example.com/post");
    let article = extract(&response).expect("blog post should extract");

    assert_eq!(article.title, "How to Build Better Software");
    assert_eq!(article.site_name.as_deref(), Some("Tech Blog"));
    assert_eq!(
        article.excerpt,
        "Principles that keep a codebase easy to change."
    );
    assert!(article.text_content.contains("Building better software"));
    assert!(article.text_content.contains("Key Principles"));
    assert_eq!(article.lang.as_deref(), Some("en"));
    assert_eq!(article.dir, None);
}

#[test]
fn test_extract_rtl_article() {
    let response = create_test_response(fixture("rtl.html"), "https://example.com/ar/story");
    let article = extract(&response).expect("rtl article should extract");

    assert_eq!(article.dir.as_deref(), Some("rtl"));
    assert_eq!(article.lang.as_deref(), Some("ar"));
    assert!(article.text_content.contains("حفل"));
}

#[test]
fn test_reject_empty_page() {
    let response = create_test_response(fixture("empty.html"), "https://example.com/empty");

    let err = extract(&response).unwrap_err();
    assert!(matches!(
        err,
        ExtractionError::NoContent | ExtractionError::Rejected(_)
    ));
}

#[test]
fn test_near_empty_body_is_an_error_not_an_empty_article() {
    let html = "<html><head><title>Nothing</title></head><body><p>Hi.</p></body></html>";
    let response = create_test_response(html.to_string(), "https://example.com/nothing");

    assert!(extract(&response).is_err());
}

#[test]
fn test_minimal_valid_content() {
    let html = format!(
        r#"<!DOCTYPE html><html><head><title>Valid Article</title></head><body><article><h1>Valid Article</h1><p>{}</p></article></body></html>"#,
        "This is a valid article with enough content to pass the minimum requirements for extraction. ".repeat(20)
    );

    let response = create_test_response(html, "https://example.com/valid");
    let article = extract(&response).expect("valid article should extract");

    assert_eq!(article.title, "Valid Article");
    assert!(article.text_content.len() > 250);
    assert!(article.content.contains("<p>"));
}

#[test]
fn test_short_brief_extracts() {
    let html = r#"<!DOCTYPE html><html lang="en"><head><title>Couple Weds at City Hall</title></head><body>
<article><h1>Couple Weds at City Hall</h1>
<p>The pair exchanged vows on Friday afternoon and plan a larger celebration with family next spring.</p>
</article></body></html>"#;

    let response = create_test_response(html.to_string(), "https://example.com/brief");
    let article = extract(&response).expect("short brief should extract");

    assert_eq!(article.title, "Couple Weds at City Hall");
    assert!(article.text_content.contains("exchanged vows on Friday"));
    assert!(article.content.contains("exchanged vows on Friday"));
}

#[test]
fn test_text_content_matches_sanitized_content() {
    let html = format!(
        r#"<!DOCTYPE html><html lang="en"><head><title>Garden Vows</title></head><body>
<article><h1>Garden Vows</h1>
<p>{story}</p>
<form action="/subscribe"><label>Join our mailing list for weekly venue picks</label><input name="email"></form>
<p>{story}</p>
</article></body></html>"#,
        story = "Guests gathered among the roses as the couple read vows they had written together. ".repeat(3)
    );

    let response = create_test_response(html, "https://example.com/garden");
    let article = extract(&response).expect("article should extract");

    assert!(!article.content.contains("mailing list"));
    assert!(!article.text_content.contains("mailing list"));
    assert!(article.text_content.contains("read vows"));
}

#[test]
fn test_malformed_html() {
    let html = format!(
        "<html><head><title>Broken</title><body><p>Unclosed tags {}<div>More content",
        "and a paragraph that keeps going without ever being closed properly ".repeat(6)
    );

    let response = create_test_response(html, "https://example.com/broken");

    // Should handle malformed HTML gracefully
    if let Ok(article) = extract(&response) {
        assert_eq!(article.title, "Broken");
        assert!(article.text_content.contains("Unclosed tags"));
    }
}

fn create_test_response(html: String, url: &str) -> PageResponse {
    PageResponse {
        url_final: Url::parse(url).unwrap(),
        status: StatusCode::OK,
        body_utf8: html,
        charset: Charset::Utf8,
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
            url in "https://[a-z]+\\.com/[a-z]*"
        ) {
            let response = create_test_response(html, &url);
            let _ = extract(&response);
        }

        #[test]
        fn test_success_is_never_empty(
            body in "[a-z ]{0,400}",
        ) {
            let html = format!("<html><head><title>T</title></head><body><p>{}</p></body></html>", body);
            let response = create_test_response(html, "https://example.com");
            if let Ok(article) = extract(&response) {
                prop_assert!(!article.content.trim().is_empty());
                prop_assert!(!article.text_content.trim().is_empty());
            }
        }
    }
}
