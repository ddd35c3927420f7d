use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{articles::ArticleError, search::SearchError};

pub const MISSING_URL_MESSAGE: &str = "URL parameter is required";
pub const ARTICLE_FAILURE_MESSAGE: &str = "Failed to fetch article content";
pub const NEWS_FAILURE_MESSAGE: &str = "Failed to fetch news";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl ToString) -> Self {
        Self {
            error: error.into(),
            details: Some(details.to_string()),
        }
    }
}

/// Failures surfaced to API callers.
#[derive(Debug)]
pub enum ApiError {
    MissingUrl,
    Article(ArticleError),
    Search(SearchError),
}

impl From<ArticleError> for ApiError {
    fn from(err: ArticleError) -> Self {
        Self::Article(err)
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        Self::Search(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingUrl => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(MISSING_URL_MESSAGE),
            ),
            ApiError::Article(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::with_details(ARTICLE_FAILURE_MESSAGE, err),
            ),
            ApiError::Search(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::with_details(NEWS_FAILURE_MESSAGE, err),
            ),
        };

        (status, Json(body)).into_response()
    }
}
