//! Runtime configuration loaded from an optional YAML file.
//!
//! Every field has a default, so an absent file or a partial one is fine:
//!
//! ```yaml
//! api:
//!   base_url: https://qiita.com/api/v2/items
//!   per_page: 100
//!   request_interval_ms: 4000
//! stopwords:
//!   urls: []
//!   extra: ["*", "&"]
//! min_likes: 1
//! text:
//!   exclude_posdetail: ["空白"]
//!   exclude_regex: "```[^`]*```"
//!   output: surface
//! ```

use crate::analysis::TokenFilterConfig;
use crate::error::Result;
use crate::stopwords::{BUILTIN_NOISE, SLOTHLIB_ENGLISH, SLOTHLIB_JAPANESE};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub stopwords: StopwordConfig,
    /// Articles with fewer likes are left out of every corpus.
    pub min_likes: u64,
    pub bag_of_words: TokenFilterConfig,
    pub text: TokenFilterConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            stopwords: StopwordConfig::default(),
            min_likes: 1,
            bag_of_words: TokenFilterConfig::bag_of_words(),
            text: TokenFilterConfig::text(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub per_page: u32,
    /// Raised to the API floor if lower.
    pub request_interval_ms: u64,
}

impl ApiConfig {
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://qiita.com/api/v2/items".to_string(),
            per_page: 100,
            request_interval_ms: 4000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StopwordConfig {
    pub urls: Vec<String>,
    pub extra: Vec<String>,
}

impl Default for StopwordConfig {
    fn default() -> Self {
        Self {
            urls: vec![SLOTHLIB_JAPANESE.to_string(), SLOTHLIB_ENGLISH.to_string()],
            extra: BUILTIN_NOISE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Load the config at `path`, or the defaults when no path is given.
#[instrument(level = "info")]
pub fn load_config(path: Option<&str>) -> Result<AppConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let config: AppConfig = serde_yaml::from_str(&raw)?;
            info!(path, "Loaded configuration");
            Ok(config)
        }
        None => {
            info!("No config file given; using defaults");
            Ok(AppConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::OutputForm;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.api.per_page, 100);
        assert_eq!(config.api.request_interval(), Duration::from_secs(4));
        assert_eq!(config.min_likes, 1);
        assert_eq!(config.stopwords.urls.len(), 2);
        assert_eq!(config.bag_of_words, TokenFilterConfig::bag_of_words());
        assert_eq!(config.text, TokenFilterConfig::text());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api:\n  request_interval_ms: 5000\ntext:\n  exclude_regex: \"```[^`]*```\"\n  exclude_posdetail: [\"空白\"]\n  output: surface"
        )
        .unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.api.request_interval_ms, 5000);
        assert_eq!(config.api.base_url, "https://qiita.com/api/v2/items");
        assert_eq!(config.text.exclude_regex.as_deref(), Some("```[^`]*```"));
        assert_eq!(config.text.output, OutputForm::Surface);
        assert_eq!(config.bag_of_words, TokenFilterConfig::bag_of_words());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_config(Some("/nonexistent/qiita_corpus.yaml")).is_err());
    }
}
