//! Error type shared by the crawler, the analysis chain and the corpus writer.
//!
//! Every failure here is fatal for a run: the corpora are only defined over a
//! complete crawl, so nothing is retried and nothing partial is written.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Response for query {query:?} has no Total-Count header")]
    MissingTotalCount { query: String },

    #[error("Invalid Total-Count header value {value:?}")]
    InvalidTotalCount { value: String },

    #[error("Malformed page for query {query:?}: {source} (body: {preview})")]
    MalformedPage {
        query: String,
        preview: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Date out of supported range next to {0}")]
    DateOutOfRange(chrono::NaiveDate),

    #[error("Invalid exclusion pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CorpusError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_invalid_range_message() {
        let err = CorpusError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2019, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: 2019-02-01 is after 2019-01-01"
        );
    }

    #[test]
    fn test_missing_total_count_mentions_query() {
        let err = CorpusError::MissingTotalCount {
            query: "created:>2019-01-01 created:<2019-01-03".to_string(),
        };
        assert!(err.to_string().contains("created:>2019-01-01"));
    }
}
