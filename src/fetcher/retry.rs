use rand::Rng;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

use crate::fetcher::{client::fetch_with, errors::FetchError, types::PageResponse};

const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

/// How many extra attempts a retriable fetch failure gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self::new(0)
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Exponential backoff delay with ±30% jitter.
pub fn calculate_backoff_delay(attempt: u32, base_delay: Duration) -> Duration {
    // Cap the exponent to prevent overflow
    let capped_attempt = attempt.min(10);

    let base_ms = base_delay.as_millis() as u64;
    let delay_ms = base_ms.saturating_mul(2_u64.saturating_pow(capped_attempt));

    let jitter_factor = rand::thread_rng().gen_range(0.7..1.3);
    Duration::from_millis((delay_ms as f64 * jitter_factor).round() as u64)
}

/// Fetch `url`, retrying failures that [`FetchError::should_retry`] allows.
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    policy: &RetryPolicy,
) -> Result<PageResponse, FetchError> {
    let mut attempt = 0;
    loop {
        match fetch_with(client, url).await {
            Ok(page) => return Ok(page),
            Err(err) if err.should_retry() && attempt < policy.max_retries => {
                let delay = calculate_backoff_delay(attempt, policy.base_delay);
                warn!(
                    url,
                    attempt = attempt + 1,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Retrying page fetch"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
