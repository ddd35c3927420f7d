use reqwest::StatusCode;
use thiserror::Error;

use crate::fetcher::BodyError;

/// Failure talking to the upstream news search API.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search API key is not configured")]
    MissingApiKey,

    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned {status}")]
    Status { status: StatusCode },

    #[error("upstream body too large ({received} bytes)")]
    BodyTooLarge { received: u64 },

    #[error("upstream returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl From<BodyError> for SearchError {
    fn from(err: BodyError) -> Self {
        match err {
            BodyError::Transport(e) => Self::Request(e),
            BodyError::TooLarge { received, .. } => Self::BodyTooLarge { received },
        }
    }
}
