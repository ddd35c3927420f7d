pub mod cleaner;
pub mod language;
pub mod metadata;
pub mod model;
pub mod reader;
pub mod reject;

#[cfg(test)]
mod tests;

pub use model::ExtractedArticle;
pub use reject::RejectReason;

use scraper::Html;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::fetcher::types::PageResponse;

/// The page was fetched but holds no usable article.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("could not parse article content")]
    NoContent,

    #[error("could not parse article content: {0}")]
    Rejected(RejectReason),
}

/// Turn a fetched page into a readable article.
///
/// Never returns an article with empty content: a page without an
/// identifiable content region is an [`ExtractionError`].
#[instrument(skip_all, fields(url = %resp.url_final))]
pub fn extract(resp: &PageResponse) -> Result<ExtractedArticle, ExtractionError> {
    let document = Html::parse_document(&resp.body_utf8);
    let meta = metadata::read_metadata(&document);

    let mut result = reader::extract(&resp.body_utf8, &document, &resp.url_final)
        .ok_or(ExtractionError::NoContent)?;

    cleaner::sanitize_and_resolve_links(&mut result, &resp.url_final);
    if result.html.trim().is_empty() {
        return Err(ExtractionError::NoContent);
    }

    let title = metadata::clean_title(&result.title);
    if let Some(reason) = reject::rejection_reason(&title, &result.text) {
        debug!(%reason, chars = result.text.len(), "Rejected extracted content");
        return Err(ExtractionError::Rejected(reason));
    }

    let excerpt = metadata::excerpt(meta.description.as_deref(), &result.html, &result.text);
    let lang = meta
        .lang
        .or_else(|| language::detect_language(&result.text));

    Ok(ExtractedArticle {
        title,
        content: result.html,
        text_content: result.text,
        excerpt,
        byline: meta.byline,
        dir: meta.dir,
        site_name: meta.site_name,
        lang,
    })
}
