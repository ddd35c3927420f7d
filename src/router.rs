use axum::{
    Router,
    http::{HeaderName, Method, header},
    middleware,
    routing::get,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app_state::AppState,
    articles, error::ErrorResponse, extractor::ExtractedArticle, health, middleware::origin_guard,
    news,
    search::{NewsArticle, NewsFeed},
};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        articles::handlers::get_article,
        news::handlers::search_news,
        news::handlers::news_feed,
    ),
    components(schemas(
        health::HealthResponse,
        ExtractedArticle,
        NewsArticle,
        NewsFeed,
        ErrorResponse,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "articles", description = "Readable article extraction"),
        (name = "news", description = "News search proxy"),
    )
)]
pub struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let cors = CorsLayer::new()
        .allow_origin(state.allowed_origins.to_allow_origin())
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/article", get(articles::handlers::get_article))
        .route("/api/news", get(news::handlers::search_news))
        .route("/api/feed", get(news::handlers::news_feed))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        // Outside CorsLayer, which answers preflights on its own.
        .layer(middleware::from_fn_with_state(
            state.allowed_origins.clone(),
            origin_guard,
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/api/article", "/api/news", "/api/feed"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
