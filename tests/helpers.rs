#![allow(dead_code)]

use axum::{Router, body::Body, http::Request, response::Response};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::ResponseTemplate;

use wonderland::{app_state::AppState, config::Config, router::build_router};

pub const TEST_API_KEY: &str = "test-key";
pub const ALLOWED_ORIGIN: &str = "http://localhost:8080";

pub fn test_config(search_url: &str) -> Config {
    Config::default()
        .with_search_api(search_url, Some(TEST_API_KEY))
        .with_allowed_origins([ALLOWED_ORIGIN])
}

pub fn test_app(config: &Config) -> Router {
    let state = AppState::from_config(config).expect("Failed to build app state");
    build_router(state)
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_with_origin(app: Router, uri: &str, origin: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header("origin", origin)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

/// 200 response carrying `page` as UTF-8 HTML.
///
/// `set_body_string` would force `text/plain`, so the raw body is set with
/// its media type instead.
pub fn html_page(page: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(page.into_bytes(), "text/html; charset=utf-8")
}

/// A publisher page the extractor accepts.
pub fn article_page(title: &str, sentence: &str) -> String {
    let paragraph = sentence.repeat(4);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><title>{title}</title><meta name="author" content="Staff Writer"></head>
<body>
  <nav><a href="/">Home</a> <a href="/weddings">Weddings</a></nav>
  <article>
    <h1>{title}</h1>
    <p>{paragraph}</p>
    <p>{paragraph}</p>
    <p>{paragraph}</p>
  </article>
  <footer>Footer links</footer>
</body>
</html>"#
    )
}

pub fn percent_encode(url: &str) -> String {
    url::form_urlencoded::byte_serialize(url.as_bytes()).collect()
}
