//! Char filters: rewrites applied to the raw text before tokenization.
//!
//! - [`UnicodeNormalizeCharFilter`]: NFKC folding (full-width ASCII, half-width kana)
//! - [`RegexReplaceCharFilter`]: Replace every match of a pattern
//!
//! [`url_filter`] and [`jp_domain_filter`] build the two fixed removal
//! filters every profile starts with.

use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// `scheme://host` prefix of a URL. The path after the host is left alone.
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://(?:[-\w.]|(?:%[\da-fA-F]{2}))+").unwrap());

/// Bare `*.jp` domain, optionally wrapped in double quotes.
static JP_DOMAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""?([-a-zA-Z0-9.`?{}]+\.jp)"?"#).unwrap());

/// Trait for rewrites over raw text.
pub trait CharFilter: Send + Sync {
    fn apply(&self, text: &str) -> String;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeNormalizeCharFilter;

impl CharFilter for UnicodeNormalizeCharFilter {
    fn apply(&self, text: &str) -> String {
        text.nfkc().collect()
    }

    fn name(&self) -> &'static str {
        "unicode_normalize"
    }
}

#[derive(Debug, Clone)]
pub struct RegexReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl RegexReplaceCharFilter {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self::from_regex(Regex::new(pattern)?, replacement))
    }

    pub fn from_regex(pattern: Regex, replacement: &str) -> Self {
        Self {
            pattern,
            replacement: replacement.to_string(),
        }
    }
}

impl CharFilter for RegexReplaceCharFilter {
    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "regex_replace"
    }
}

/// Deletes URL-shaped substrings.
pub fn url_filter() -> RegexReplaceCharFilter {
    RegexReplaceCharFilter::from_regex(Regex::clone(&URL_RE), "")
}

/// Deletes bare `.jp` domains.
pub fn jp_domain_filter() -> RegexReplaceCharFilter {
    RegexReplaceCharFilter::from_regex(Regex::clone(&JP_DOMAIN_RE), "")
}
