//! Items API access with mandatory request pacing.
//!
//! This module provides the interface the crawler uses to fetch pages of
//! articles. The remote API enforces a hard request-rate ceiling, so every
//! request goes through a pacing decorator that sleeps before delegating.
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`ItemSource`]: Core trait defining async page retrieval
//! - [`QiitaClient`]: HTTP implementation against `GET /api/v2/items`
//! - [`RateLimited`]: Decorator that sleeps a fixed interval before every request
//!
//! # Pacing
//!
//! - Default interval 4 seconds
//! - Hard floor 3.6 seconds (1000 authenticated requests per hour)
//! - The sleep happens before every request, the first one included

use crate::error::{CorpusError, Result};
use crate::models::{ApiItem, Article, Page, PageQuery};
use crate::utils::truncate_for_log;
use reqwest::Client;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Response header carrying the number of matches for a search query.
pub const TOTAL_COUNT_HEADER: &str = "Total-Count";

/// Lowest interval between two requests the API tolerates.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(3600);

/// Trait for async page retrieval.
///
/// Implementors fetch one page of articles for a date window. This
/// abstraction lets the crawler run against the live API or an in-memory
/// source, and lets decorators (like pacing) wrap either.
#[allow(async_fn_in_trait)]
pub trait ItemSource {
    /// Fetch the page described by `query`.
    ///
    /// # Returns
    ///
    /// The page's articles and the server-reported total for the window, or
    /// an error if the request or its payload is unusable.
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page>;
}

/// Wrapper that sleeps a fixed interval before every call to the inner [`ItemSource`].
///
/// The interval never drops below [`MIN_REQUEST_INTERVAL`].
pub struct RateLimited<T> {
    /// The underlying source to pace.
    inner: T,
    /// Sleep before each request.
    interval: Duration,
}

impl<T> RateLimited<T>
where
    T: ItemSource,
{
    /// Wrap `inner`, raising `interval` to [`MIN_REQUEST_INTERVAL`] if needed.
    pub fn new(inner: T, interval: Duration) -> Self {
        let interval = if interval < MIN_REQUEST_INTERVAL {
            warn!(
                requested_ms = interval.as_millis() as u64,
                floor_ms = MIN_REQUEST_INTERVAL.as_millis() as u64,
                "Request interval below API floor; using floor"
            );
            MIN_REQUEST_INTERVAL
        } else {
            interval
        };
        Self { inner, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T> fmt::Debug for RateLimited<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimited")
            .field("interval", &self.interval)
            .finish()
    }
}

impl<T> ItemSource for RateLimited<T>
where
    T: ItemSource,
{
    #[instrument(level = "debug", skip_all, fields(day = %query.window.day, page = query.page))]
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page> {
        debug!(interval_ms = self.interval.as_millis() as u64, "Pacing before request");
        sleep(self.interval).await;
        self.inner.fetch_page(query).await
    }
}

/// HTTP client for the items endpoint.
///
/// Sends `page`, `per_page` and `query` as URL parameters and authenticates
/// with a bearer token.
pub struct QiitaClient {
    http: Client,
    base_url: Url,
    auth_token: String,
}

impl QiitaClient {
    /// Create a client for `base_url` (e.g. `https://qiita.com/api/v2/items`).
    pub fn new(http: Client, base_url: &str, auth_token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            auth_token: auth_token.into(),
        })
    }

    /// The full request URL for `query`.
    pub fn request_url(&self, query: &PageQuery) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("page", &query.page.to_string())
            .append_pair("per_page", &query.per_page.to_string())
            .append_pair("query", &query.window.query());
        url
    }
}

impl fmt::Debug for QiitaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QiitaClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl ItemSource for QiitaClient {
    #[instrument(level = "info", skip_all, fields(day = %query.window.day, page = query.page))]
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page> {
        let t0 = Instant::now();
        let url = self.request_url(query);

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.auth_token)
            .send()
            .await?
            .error_for_status()?;

        let search = query.window.query();
        let total_count = match response.headers().get(TOTAL_COUNT_HEADER) {
            Some(value) => parse_total_count(value.to_str().unwrap_or_default())?,
            None => return Err(CorpusError::MissingTotalCount { query: search }),
        };

        let body = response.text().await?;
        let articles = parse_items(&body, &search)?;

        info!(
            total_count,
            fetched = articles.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(Page {
            articles,
            total_count,
        })
    }
}

/// Parse the `Total-Count` header value.
pub fn parse_total_count(value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| CorpusError::InvalidTotalCount {
            value: value.to_string(),
        })
}

/// Decode a page body into articles, attaching `tags_str` to each.
pub fn parse_items(body: &str, search: &str) -> Result<Vec<Article>> {
    let items: Vec<ApiItem> =
        serde_json::from_str(body).map_err(|source| CorpusError::MalformedPage {
            query: search.to_string(),
            preview: truncate_for_log(body, 200),
            source,
        })?;
    Ok(items.into_iter().map(Article::from).collect())
}
