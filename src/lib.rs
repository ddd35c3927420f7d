//! Backend for the Wedded Wonderland news site: readable-article extraction
//! for publisher pages and a credential-injecting proxy for news search.

pub mod app_state;
pub mod articles;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod middleware;
pub mod news;
pub mod router;
pub mod search;
pub mod telemetry;
