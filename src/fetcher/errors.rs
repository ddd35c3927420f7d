use thiserror::Error;

use crate::fetcher::body::BodyError;

/// Failure retrieving a publisher page.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status}")]
    Http {
        status: reqwest::StatusCode,
        retriable: bool,
    },

    /// Declared length, or bytes received before the cap was hit.
    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    pub fn should_retry(&self) -> bool {
        match self {
            Self::InvalidUrl(_)
            | Self::UnsupportedScheme(_)
            | Self::BodyTooLarge(_)
            | Self::UnsupportedContentType(_)
            | Self::RedirectLoop => false,
            Self::Http { retriable, .. } => *retriable,
            Self::Connect(_)
            | Self::ConnectTimeout
            | Self::RequestTimeout
            | Self::Io(_)
            | Self::Unknown(_) => true,
        }
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http {
                status,
                retriable: status.is_server_error(),
            }
        } else if err.is_connect() || err.is_request() {
            // DNS resolution, refused connections, TLS handshakes
            Self::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Io(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}


impl From<BodyError> for FetchError {
    fn from(err: BodyError) -> Self {
        match err {
            BodyError::Transport(e) => Self::from_reqwest_error(e),
            BodyError::TooLarge { received, .. } => Self::BodyTooLarge(received),
        }
    }
}
