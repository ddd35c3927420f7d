use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use tracing::{error, info};

use crate::{
    app_state::AppState,
    articles::{dtos::ArticleQuery, service::fetch_article_content},
    error::{ApiError, ErrorResponse},
    extractor::ExtractedArticle,
};

#[utoipa::path(
    get,
    path = "/api/article",
    tag = "articles",
    params(ArticleQuery),
    responses(
        (status = 200, description = "Readable article content", body = ExtractedArticle),
        (status = 400, description = "Missing url parameter", body = ErrorResponse),
        (status = 500, description = "Page could not be fetched or parsed", body = ErrorResponse)
    )
)]
pub async fn get_article(
    State(state): State<AppState>,
    query: Result<Query<ArticleQuery>, QueryRejection>,
) -> Result<Json<ExtractedArticle>, ApiError> {
    // A repeated or malformed `url` is treated like a missing one.
    let Ok(Query(query)) = query else {
        return Err(ApiError::MissingUrl);
    };
    let url = query.url().ok_or(ApiError::MissingUrl)?;

    info!(url, "Received request for URL");

    let article = fetch_article_content(&state, url)
        .await
        .inspect_err(|e| error!(url, error = %e, "Error fetching article"))?;

    Ok(Json(article))
}
