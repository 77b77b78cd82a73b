//! Stopword lists for the bag-of-words profile.
//!
//! The set is the union of newline-delimited word lists downloaded once per
//! run and a built-in list of punctuation and noise tokens that survive
//! tokenization of technical articles.

use crate::error::Result;
use reqwest::Client;
use std::collections::HashSet;
use tracing::{info, instrument};

/// SlothLib Japanese stopword list.
pub const SLOTHLIB_JAPANESE: &str = "http://svn.sourceforge.jp/svnroot/slothlib/CSharp/Version1/SlothLib/NLP/Filter/StopWord/word/Japanese.txt";
/// SlothLib English stopword list.
pub const SLOTHLIB_ENGLISH: &str = "http://svn.sourceforge.jp/svnroot/slothlib/CSharp/Version1/SlothLib/NLP/Filter/StopWord/word/English.txt";

/// Noise tokens added to every downloaded list.
pub const BUILTIN_NOISE: &[&str] = &[
    "*", "&", "[", "]", ")", "(", "-", ":", ".", "/", "0", "...?", "——", "!【", "\"", ")、",
    ")。", ")」",
];

/// Immutable set of stopwords.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Download every list in `urls` and union them with `extra`.
    ///
    /// Any failed download aborts; the bag-of-words corpus is not built
    /// against a partial list.
    #[instrument(level = "info", skip_all, fields(lists = urls.len()))]
    pub async fn fetch(http: &Client, urls: &[String], extra: &[String]) -> Result<Self> {
        let mut words: HashSet<String> = extra.iter().cloned().collect();

        for url in urls {
            let body = http.get(url).send().await?.error_for_status()?.text().await?;
            let before = words.len();
            words.extend(parse_list(&body));
            info!(%url, added = words.len() - before, "Loaded stopword list");
        }

        info!(count = words.len(), "Stopword set ready");
        Ok(Self { words })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// One trimmed word per non-blank line.
pub fn parse_list(body: &str) -> impl Iterator<Item = String> + '_ {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}
