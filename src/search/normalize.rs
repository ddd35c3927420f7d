//! Maps the JSON shapes of the supported news APIs onto [`NewsArticle`].
//!
//! Recognised shapes:
//! - SerpApi Google News: `news_results[]` with `link`, `snippet`,
//!   `thumbnail`, `iso_date`/`date`, and `source` as an object or a string.
//!   Clustered results carry their articles under `stories[]`.
//! - NewsAPI: `articles[]` with `url`, `description`, `urlToImage`,
//!   `publishedAt` and `source.name`.
//! - GNews: `articles[]` like NewsAPI but with `image` for the picture.
//!
//! Entries without a link are dropped; every other field has a fallback.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_SOURCE: &str = "Unknown source";

/// SerpApi's `date` field, e.g. `"10/18/2026, 07:00 AM, +0000 UTC"`.
const SERPAPI_DATE_FORMAT: &str = "%m/%d/%Y, %I:%M %p, %z";
/// Display format of the article cards.
const LABEL_FORMAT: &str = "%b %d, %Y";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub url_to_image: Option<String>,
    pub source: String,
    pub published_at: Option<DateTime<Utc>>,
    /// `published_at` rendered as "Oct 18, 2026".
    pub published_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewsFeed {
    pub featured: Option<NewsArticle>,
    pub articles: Vec<NewsArticle>,
}

/// Normalize an upstream body and split off the first article as featured.
pub fn normalize_feed(body: &Value, limit: usize) -> NewsFeed {
    let mut articles = normalize_articles(body);
    articles.truncate(limit);

    if articles.is_empty() {
        return NewsFeed::default();
    }
    let featured = articles.remove(0);
    NewsFeed {
        featured: Some(featured),
        articles,
    }
}

pub fn normalize_articles(body: &Value) -> Vec<NewsArticle> {
    if let Some(results) = body.get("news_results").and_then(Value::as_array) {
        return results
            .iter()
            .flat_map(serpapi_entries)
            .filter_map(from_serpapi)
            .collect();
    }

    if let Some(articles) = body.get("articles").and_then(Value::as_array) {
        return articles.iter().filter_map(from_articles_entry).collect();
    }

    Vec::new()
}

/// A clustered SerpApi result holds its articles in `stories`.
fn serpapi_entries(entry: &Value) -> Vec<&Value> {
    match entry.get("stories").and_then(Value::as_array) {
        Some(stories) if entry.get("link").is_none() => stories.iter().collect(),
        _ => vec![entry],
    }
}

fn from_serpapi(entry: &Value) -> Option<NewsArticle> {
    let url = non_empty_str(entry, "link")?;

    let source = match entry.get("source") {
        Some(Value::String(name)) => Some(name.trim().to_string()),
        Some(source) => non_empty_str(source, "name"),
        None => None,
    }
    .filter(|name| !name.is_empty());

    let published_at = non_empty_str(entry, "iso_date")
        .and_then(|raw| parse_timestamp(&raw))
        .or_else(|| non_empty_str(entry, "date").and_then(|raw| parse_serpapi_date(&raw)));

    Some(build_article(
        non_empty_str(entry, "title"),
        non_empty_str(entry, "snippet"),
        url,
        non_empty_str(entry, "thumbnail").or_else(|| non_empty_str(entry, "thumbnail_small")),
        source,
        published_at,
    ))
}

fn from_articles_entry(entry: &Value) -> Option<NewsArticle> {
    let url = non_empty_str(entry, "url")?;

    let source = entry
        .get("source")
        .and_then(|source| non_empty_str(source, "name"));
    let published_at = non_empty_str(entry, "publishedAt").and_then(|raw| parse_timestamp(&raw));

    Some(build_article(
        non_empty_str(entry, "title"),
        non_empty_str(entry, "description"),
        url,
        non_empty_str(entry, "urlToImage").or_else(|| non_empty_str(entry, "image")),
        source,
        published_at,
    ))
}

fn build_article(
    title: Option<String>,
    description: Option<String>,
    url: String,
    url_to_image: Option<String>,
    source: Option<String>,
    published_at: Option<DateTime<Utc>>,
) -> NewsArticle {
    NewsArticle {
        title: title.unwrap_or_else(|| UNTITLED.to_string()),
        description: description.unwrap_or_default(),
        url,
        url_to_image,
        source: source.unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
        published_label: published_at.map(|at| at.format(LABEL_FORMAT).to_string()),
        published_at,
    }
}

fn non_empty_str(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn parse_serpapi_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim().trim_end_matches(" UTC");
    DateTime::parse_from_str(trimmed, SERPAPI_DATE_FORMAT)
        .map(|at| at.with_timezone(&Utc))
        .ok()
}
