use crate::fetcher::{
    body::read_capped, errors::FetchError, pipeline::process_response, types::PageResponse,
};
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;
use tracing::{debug, instrument};

pub const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB

/// Publishers commonly refuse clients that do not look like a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Build the page-fetching client with the given timeouts.
pub fn build_client(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("en-US,en;q=0.9"),
    );

    ClientBuilder::new()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .user_agent(BROWSER_USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers(headers)
        .build()
}

#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_with(client: &Client, url: &str) -> Result<PageResponse, FetchError> {
    let parsed_url = url::Url::parse(url)?;
    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(FetchError::UnsupportedScheme(parsed_url.scheme().to_string()));
    }

    let response = client
        .get(parsed_url)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    let final_url = response.url().clone();
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Http {
            status,
            retriable: status.is_server_error(),
        });
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    let mime = content_type.to_ascii_lowercase();
    if !mime.contains("text/html") && !mime.contains("application/xhtml") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let body_bytes = read_capped(response, MAX_BODY_SIZE).await?;

    debug!(
        final_url = %final_url,
        %status,
        bytes = body_bytes.len(),
        "Fetched page"
    );

    Ok(process_response(final_url, status, &body_bytes, &content_type))
}
