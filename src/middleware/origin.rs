use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header::ORIGIN},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_http::cors::AllowOrigin;
use tracing::{error, warn};

use crate::error::ErrorResponse;

pub const CORS_REJECTION_MESSAGE: &str = "Not allowed by CORS";

/// Browser origins permitted to call the API.
#[derive(Debug, Clone)]
pub struct OriginAllowList {
    origins: Arc<Vec<HeaderValue>>,
}

impl OriginAllowList {
    pub fn new<S: AsRef<str>>(origins: &[S]) -> Self {
        let origins = origins
            .iter()
            .filter_map(|origin| {
                let origin = origin.as_ref();
                HeaderValue::from_str(origin)
                    .inspect_err(|_| error!(origin, "Ignoring unrepresentable CORS origin"))
                    .ok()
            })
            .collect();
        Self {
            origins: Arc::new(origins),
        }
    }

    pub fn allows(&self, origin: &HeaderValue) -> bool {
        self.origins.iter().any(|allowed| allowed == origin)
    }

    /// The same list, in the form `CorsLayer` expects.
    pub fn to_allow_origin(&self) -> AllowOrigin {
        AllowOrigin::list(self.origins.iter().cloned())
    }
}

/// Reject cross-origin browser requests from origins not on the list.
///
/// Requests without an `Origin` header (curl, server-to-server) pass.
pub async fn origin_guard(
    State(allow_list): State<OriginAllowList>,
    req: Request,
    next: Next,
) -> Response {
    if let Some(origin) = req.headers().get(ORIGIN)
        && !allow_list.allows(origin)
    {
        warn!(origin = ?origin, path = %req.uri().path(), "Rejected request from disallowed origin");
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new(CORS_REJECTION_MESSAGE)),
        )
            .into_response();
    }

    next.run(req).await
}
