//! Date-partitioned, paginated crawl over the items API.
//!
//! The requested range is tiled into one [`DateWindow`] per calendar day. Each
//! window is paged through sequentially until the server-reported total is
//! covered. Pacing lives in [`RateLimited`]; pagination is driven by the pure
//! [`WindowState`] machine so it can be tested without a source at all.
//!
//! # Window tiling
//!
//! ```text
//! requested:  2019-01-01 ..= 2019-01-03
//! windows:    (12-31, 01-02) -> 01-01
//!             (01-01, 01-03) -> 01-02
//!             (01-02, 01-04) -> 01-03
//! ```
//!
//! Consecutive windows overlap by one day at each bound, but because both
//! bounds are exclusive every calendar day is selected by exactly one window.

use crate::api::{ItemSource, RateLimited};
use crate::error::{CorpusError, Result};
use crate::models::{Article, DateWindow, PageQuery};
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{info, instrument};

/// Largest page size the items endpoint accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Build one window per day of the inclusive range `[start, end]`.
pub fn date_windows(start: NaiveDate, end: NaiveDate) -> Result<Vec<DateWindow>> {
    if start > end {
        return Err(CorpusError::InvalidDateRange { start, end });
    }

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| {
            Ok(DateWindow {
                start: day.pred_opt().ok_or(CorpusError::DateOutOfRange(day))?,
                end: day.succ_opt().ok_or(CorpusError::DateOutOfRange(day))?,
                day,
            })
        })
        .collect()
}

/// Number of pages needed to cover `total_count` results.
pub fn page_count(total_count: u64, per_page: u32) -> u64 {
    total_count.div_ceil(u64::from(per_page.max(1)))
}

/// What the crawler should do next for the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlAction {
    /// Sleep the pacing interval, then request this page.
    Request { page: u32 },
    /// The window is covered; move to the next one.
    AdvanceWindow,
}

/// Pagination state for a single window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// Nothing requested yet; the total is unknown.
    BeforeWindow,
    /// `page` has been fetched and more pages remain.
    PageRequested { page: u32, total_count: u64 },
    /// Every page of the window has been fetched.
    WindowExhausted,
}

impl WindowState {
    pub fn next_action(&self) -> CrawlAction {
        match *self {
            WindowState::BeforeWindow => CrawlAction::Request { page: 1 },
            WindowState::PageRequested { page, .. } => CrawlAction::Request { page: page + 1 },
            WindowState::WindowExhausted => CrawlAction::AdvanceWindow,
        }
    }

    /// Transition after `page` has been fetched.
    ///
    /// The total reported with page 1 is authoritative for the window; totals
    /// reported with later pages are ignored.
    pub fn record_page(self, page: u32, reported_total: u64, per_page: u32) -> WindowState {
        let total_count = match self {
            WindowState::PageRequested { total_count, .. } => total_count,
            _ => reported_total,
        };

        if u64::from(page) >= page_count(total_count, per_page) {
            WindowState::WindowExhausted
        } else {
            WindowState::PageRequested { page, total_count }
        }
    }
}

/// Sequential crawler over a paced [`ItemSource`].
#[derive(Debug)]
pub struct Crawler<S> {
    source: RateLimited<S>,
    per_page: u32,
}

impl<S> Crawler<S>
where
    S: ItemSource,
{
    pub fn new(source: S, per_page: u32, request_interval: Duration) -> Self {
        Self {
            source: RateLimited::new(source, request_interval),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Fetch every article created between `start` and `end`, both inclusive.
    ///
    /// Any failure aborts the whole crawl; nothing fetched so far is returned.
    #[instrument(level = "info", skip(self))]
    pub async fn crawl(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Article>> {
        let windows = date_windows(start, end)?;
        info!(windows = windows.len(), "Crawling date windows");

        let mut articles = Vec::new();
        for window in &windows {
            let before = articles.len();
            self.crawl_window(window, &mut articles).await?;
            info!(day = %window.day, fetched = articles.len() - before, "Window complete");
        }

        info!(count = articles.len(), "Crawl complete");
        Ok(articles)
    }

    async fn crawl_window(&self, window: &DateWindow, articles: &mut Vec<Article>) -> Result<()> {
        let mut state = WindowState::BeforeWindow;

        while let CrawlAction::Request { page } = state.next_action() {
            info!(day = %window.day, page, "Requesting page");
            let query = PageQuery {
                window: *window,
                page,
                per_page: self.per_page,
            };
            let fetched = self.source.fetch_page(&query).await?;

            if state == WindowState::BeforeWindow {
                if fetched.total_count == 0 {
                    info!(day = %window.day, "No articles");
                } else {
                    info!(day = %window.day, total_count = fetched.total_count, "Total articles");
                }
            }

            state = state.record_page(page, fetched.total_count, self.per_page);
            articles.extend(fetched.articles);
        }

        Ok(())
    }
}
