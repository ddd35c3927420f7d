pub mod errors;
pub mod normalize;
pub mod proxy;
pub mod types;

pub use errors::SearchError;
pub use normalize::{NewsArticle, NewsFeed, normalize_feed};
pub use proxy::{NewsSearch, SearchProxy};
pub use types::{SearchQuery, UpstreamBody};

#[cfg(test)]
pub use proxy::MockNewsSearch;
