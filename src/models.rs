//! Data models for crawled articles and the query units used to fetch them.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: One item as returned by the items endpoint, plus the derived `tags_str`
//! - [`DateWindow`]: The exclusive date bounds that select a single calendar day
//! - [`PageQuery`]: One request against a window
//! - [`Page`]: One response batch and the server-reported total for its window

use chrono::NaiveDate;
use itertools::Itertools;
use serde::Deserialize;

/// A tag as it appears in the API payload (`{"name": "Python", "versions": []}`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

/// The subset of an item payload the corpus needs.
///
/// `body` and `tags` are guaranteed by the API contract; an item without them
/// fails to deserialize and aborts the crawl.
#[derive(Debug, Deserialize)]
pub struct ApiItem {
    pub id: String,
    pub body: String,
    pub tags: Vec<Tag>,
    pub likes_count: u64,
}

/// A crawled article.
///
/// Created once from an [`ApiItem`] when its page is ingested and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// The opaque item id.
    pub id: String,
    /// Raw markdown body, mixed Japanese/English, may contain URLs.
    pub body: String,
    /// Tag names in API order.
    pub tags: Vec<String>,
    /// Quality signal used by the pipeline's gate.
    pub likes_count: u64,
    /// Comma-joined tag names.
    pub tags_str: String,
}

impl From<ApiItem> for Article {
    fn from(item: ApiItem) -> Self {
        let tags: Vec<String> = item.tags.into_iter().map(|t| t.name).collect();
        let tags_str = tags.iter().join(",");
        Article {
            id: item.id,
            body: item.body,
            tags,
            likes_count: item.likes_count,
            tags_str,
        }
    }
}

/// Exclusive date bounds selecting exactly one calendar day.
///
/// The search filter `created:>A created:<B` is exclusive on both sides, so
/// day `D` is fetched with `start = D-1` and `end = D+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// The calendar day this window targets.
    pub day: NaiveDate,
}

impl DateWindow {
    /// The search expression for this window, e.g. `created:>2019-01-01 created:<2019-01-03`.
    pub fn query(&self) -> String {
        format!(
            "created:>{} created:<{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// One page request against a window. Pages are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub window: DateWindow,
    pub page: u32,
    pub per_page: u32,
}

/// One fetched batch and the total number of matches for its window.
#[derive(Debug, Clone)]
pub struct Page {
    pub articles: Vec<Article>,
    pub total_count: u64,
}
