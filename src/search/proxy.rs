use async_trait::async_trait;
use reqwest::{Client, header};
use std::time::Duration;
use tracing::{instrument, warn};
use url::Url;

/// Upstream search responses are small JSON documents.
pub const MAX_UPSTREAM_BODY: u64 = 2 * 1024 * 1024;

use super::errors::SearchError;
use crate::fetcher::read_capped;
use super::types::{SearchQuery, UpstreamBody};

/// Upstream news search, as seen by the HTTP handlers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSearch: Send + Sync {
    async fn search(&self, query: SearchQuery) -> Result<UpstreamBody, SearchError>;
}

/// Forwards queries to a fixed upstream endpoint with the server's key.
pub struct SearchProxy {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    key_param: String,
}

impl SearchProxy {
    pub fn new(
        endpoint: Url,
        api_key: Option<String>,
        key_param: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            key_param: key_param.into(),
        })
    }
}

#[async_trait]
impl NewsSearch for SearchProxy {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn search(&self, query: SearchQuery) -> Result<UpstreamBody, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;
        let query = query.with_credential(&self.key_param, api_key);

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .query(query.pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Upstream search returned an error status");
            return Err(SearchError::Status { status });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(str::to_string);
        let body = read_capped(response, MAX_UPSTREAM_BODY).await?;

        Ok(UpstreamBody {
            status,
            content_type,
            body,
        })
    }
}
