mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use helpers::{article_page, body_json, get, html_page, percent_encode, test_app, test_config};

const CEREMONY: &str =
    "The couple exchanged vows beneath an old oak tree while friends gathered on the lawn. ";
const RECEPTION: &str =
    "Dinner was served at long tables under strings of lights as the band played until midnight. ";

async fn publisher() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ceremony"))
        .respond_with(html_page(article_page("Garden Ceremony in Provence", CEREMONY)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/reception"))
        .respond_with(html_page(article_page("Lakeside Reception Highlights", RECEPTION)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/thin"))
        .respond_with(html_page(
            "<html><head><title>Thin</title></head><body></body></html>".to_string(),
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/brief"))
        .respond_with(html_page(
            r#"<html lang="en"><head><title>Couple Weds at City Hall</title></head><body>
<article><h1>Couple Weds at City Hall</h1>
<p>The pair exchanged vows on Friday afternoon and plan a larger celebration next spring.</p>
</article></body></html>"#
                .to_string(),
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    server
}

fn article_uri(server: &MockServer, page: &str) -> String {
    let target = format!("{}/{}", server.uri(), page);
    format!("/api/article?url={}", percent_encode(&target))
}

#[tokio::test]
async fn test_missing_url_is_bad_request() {
    let app = test_app(&test_config("http://127.0.0.1:9/search"));

    let response = get(app, "/api/article").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "URL parameter is required" })
    );
}

#[tokio::test]
async fn test_blank_url_is_bad_request() {
    let app = test_app(&test_config("http://127.0.0.1:9/search"));

    let response = get(app, "/api/article?url=%20%20").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_article_is_extracted() {
    let server = publisher().await;
    let app = test_app(&test_config("http://127.0.0.1:9/search"));

    let response = get(app, &article_uri(&server, "ceremony")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Garden Ceremony in Provence");
    assert_eq!(body["byline"], "Staff Writer");
    assert_eq!(body["lang"], "en");

    let content = body["content"].as_str().unwrap();
    assert!(content.contains("oak tree"));
    assert!(!content.contains("<nav"));
    assert!(
        body["textContent"]
            .as_str()
            .unwrap()
            .contains("exchanged vows")
    );
    assert!(!body["excerpt"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_short_brief_is_extracted() {
    let server = publisher().await;
    let app = test_app(&test_config("http://127.0.0.1:9/search"));

    let response = get(app, &article_uri(&server, "brief")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Couple Weds at City Hall");
    assert!(
        body["textContent"]
            .as_str()
            .unwrap()
            .contains("exchanged vows on Friday")
    );
}

#[tokio::test]
async fn test_upstream_error_is_reported_with_details() {
    let server = publisher().await;
    let app = test_app(&test_config("http://127.0.0.1:9/search"));

    let response = get(app, &article_uri(&server, "missing")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to fetch article content");
    assert!(body["details"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_page_without_content_is_an_error() {
    let server = publisher().await;
    let app = test_app(&test_config("http://127.0.0.1:9/search"));

    let response = get(app, &article_uri(&server, "thin")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to fetch article content");
    assert!(body.get("title").is_none());
}

#[tokio::test]
async fn test_unreachable_host_is_an_error() {
    let app = test_app(&test_config("http://127.0.0.1:9/search"));

    let response = get(app, "/api/article?url=http%3A%2F%2F127.0.0.1%3A9%2Fnowhere").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to fetch article content");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_concurrent_requests_get_their_own_article() {
    let server = publisher().await;
    let app = test_app(&test_config("http://127.0.0.1:9/search"));

    let ceremony_uri = article_uri(&server, "ceremony");
    let reception_uri = article_uri(&server, "reception");
    let (ceremony, reception) = tokio::join!(
        get(app.clone(), &ceremony_uri),
        get(app.clone(), &reception_uri),
    );

    let ceremony = body_json(ceremony).await;
    let reception = body_json(reception).await;

    assert_eq!(ceremony["title"], "Garden Ceremony in Provence");
    assert_eq!(reception["title"], "Lakeside Reception Highlights");
    assert!(!ceremony["textContent"].as_str().unwrap().contains("band played"));
    assert!(!reception["textContent"].as_str().unwrap().contains("oak tree"));
}
