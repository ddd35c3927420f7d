use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    app_state::AppState,
    extractor::{self, ExtractedArticle, ExtractionError},
    fetcher::{FetchError, fetch_with_retry},
};

#[derive(Error, Debug)]
pub enum ArticleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("extraction task failed: {0}")]
    Worker(String),
}

/// Fetch `url` and extract its readable article.
#[instrument(skip(state))]
pub async fn fetch_article_content(
    state: &AppState,
    url: &str,
) -> Result<ExtractedArticle, ArticleError> {
    let page = fetch_with_retry(&state.http_client, url, &state.retry).await?;
    info!(
        final_url = %page.url_final,
        status = %page.status,
        charset = ?page.charset,
        bytes = page.body_utf8.len(),
        "Got response from article URL"
    );

    // DOM parsing is CPU-bound; keep it off the async workers.
    let article = tokio::task::spawn_blocking(move || extractor::extract(&page))
        .await
        .map_err(|e| ArticleError::Worker(e.to_string()))??;

    info!(title = %article.title, "Successfully parsed article");
    Ok(article)
}
