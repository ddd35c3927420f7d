use axum::{
    Json,
    body::Body,
    extract::{Query, State},
    http::{HeaderValue, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::{
    app_state::AppState,
    error::{ApiError, ErrorResponse},
    news::{FEED_SIZE, WEDDING_FEED_DEFAULTS},
    search::{NewsFeed, SearchError, SearchQuery, UpstreamBody, normalize_feed},
};

impl IntoResponse for UpstreamBody {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        let content_type = self
            .content_type
            .and_then(|ct| HeaderValue::from_str(&ct).ok())
            .unwrap_or_else(|| HeaderValue::from_static("application/json"));
        response.headers_mut().insert(CONTENT_TYPE, content_type);
        response
    }
}

/// Forward the query string to the upstream search API and relay its body.
#[utoipa::path(
    get,
    path = "/api/news",
    tag = "news",
    responses(
        (status = 200, description = "Upstream search response, unmodified"),
        (status = 500, description = "Upstream call failed", body = ErrorResponse)
    )
)]
pub async fn search_news(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<UpstreamBody, ApiError> {
    let query = SearchQuery::from_pairs(params);
    info!(params = query.pairs().len(), "Forwarding news search");

    let body = state
        .search
        .search(query)
        .await
        .inspect_err(|e| error!(error = %e, "News search failed"))?;
    Ok(body)
}

/// Wedding news normalized into a featured article and a card grid.
#[utoipa::path(
    get,
    path = "/api/feed",
    tag = "news",
    responses(
        (status = 200, description = "Normalized news feed", body = NewsFeed),
        (status = 500, description = "Upstream call failed", body = ErrorResponse)
    )
)]
pub async fn news_feed(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<NewsFeed>, ApiError> {
    let query = SearchQuery::from_pairs(params).with_defaults(&WEDDING_FEED_DEFAULTS);

    let upstream = state
        .search
        .search(query)
        .await
        .inspect_err(|e| error!(error = %e, "News feed search failed"))?;
    let body = upstream.json().map_err(SearchError::from).inspect_err(
        |e| error!(error = %e, "News feed upstream body is not JSON"),
    )?;

    let feed = normalize_feed(&body, FEED_SIZE);
    info!(
        articles = feed.articles.len() + usize::from(feed.featured.is_some()),
        "Built news feed"
    );
    Ok(Json(feed))
}
