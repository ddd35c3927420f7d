pub mod body;
pub mod client;
pub mod errors;
pub mod pipeline;
pub mod retry;
pub mod types;

pub use body::{BodyError, read_capped};
pub use client::{BROWSER_USER_AGENT, MAX_BODY_SIZE, build_client, fetch_with};
pub use errors::FetchError;
pub use retry::{RetryPolicy, fetch_with_retry};
pub use types::{Charset, PageResponse};
