pub mod dtos;
pub mod handlers;
pub mod service;

pub use service::{ArticleError, fetch_article_content};
