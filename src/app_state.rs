use anyhow::{Context, Result};
use reqwest::Client;
use std::sync::Arc;
use url::Url;

use crate::{
    config::Config,
    fetcher::{RetryPolicy, build_client},
    middleware::OriginAllowList,
    search::{NewsSearch, SearchProxy},
};

#[derive(Clone)]
pub struct AppState {
    pub http_client: Client,
    pub retry: RetryPolicy,
    pub search: Arc<dyn NewsSearch>,
    pub allowed_origins: OriginAllowList,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http_client = build_client(config.fetch_connect_timeout(), config.fetch_timeout())
            .context("Failed to build page-fetching HTTP client")?;

        let endpoint = Url::parse(config.search_api_url()).context("Invalid search API URL")?;
        let search = SearchProxy::new(
            endpoint,
            config.search_api_key().map(str::to_string),
            config.search_api_key_param(),
            config.fetch_timeout(),
        )
        .context("Failed to build search HTTP client")?;

        Ok(Self {
            http_client,
            retry: RetryPolicy::new(config.fetch_max_retries()),
            search: Arc::new(search),
            allowed_origins: OriginAllowList::new(config.allowed_origins()),
        })
    }
}
