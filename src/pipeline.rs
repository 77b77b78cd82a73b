//! Corpus construction from crawled articles.
//!
//! Articles below the like threshold are dropped from all three corpora. Every
//! surviving article contributes exactly one entry to each corpus, at the same
//! index.

use crate::analysis::Normalizer;
use crate::error::Result;
use crate::models::Article;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Log progress every this many documents.
const PROGRESS_EVERY: usize = 500;

/// Three index-aligned corpora.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpora {
    /// Bag-of-words tokens per document.
    pub bow: Vec<Vec<String>>,
    /// Lightly filtered surface tokens per document.
    pub text: Vec<Vec<String>>,
    /// Lowercased tags per document.
    pub target: Vec<Vec<String>>,
}

impl Corpora {
    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    fn push(&mut self, bow: Vec<String>, text: Vec<String>, target: Vec<String>) {
        self.bow.push(bow);
        self.text.push(text);
        self.target.push(target);
    }
}

/// Lowercase `tags_str` and split it on commas.
pub fn target_tags(tags_str: &str) -> Vec<String> {
    tags_str.to_lowercase().split(',').map(str::to_string).collect()
}

/// Build the corpora from `articles`.
///
/// # Arguments
///
/// * `articles` - The full crawl
/// * `bow` - Normalizer for the bag-of-words profile
/// * `text` - Normalizer for the text profile
/// * `min_likes` - Quality gate; articles with fewer likes are skipped
#[instrument(level = "info", skip_all, fields(articles = articles.len(), min_likes = min_likes))]
pub fn build_corpora(
    articles: &[Article],
    bow: &Normalizer,
    text: &Normalizer,
    min_likes: u64,
) -> Result<Corpora> {
    let t0 = Instant::now();
    let kept: Vec<&Article> = articles
        .iter()
        .filter(|article| article.likes_count >= min_likes)
        .collect();
    info!(
        kept = kept.len(),
        dropped = articles.len() - kept.len(),
        "Applied quality gate"
    );

    let mut corpora = Corpora::default();
    for (i, article) in kept.iter().enumerate() {
        debug!(index = i, id = %article.id, "Normalizing article");
        corpora.push(
            bow.tokenize(&article.body)?,
            text.tokenize(&article.body)?,
            target_tags(&article.tags_str),
        );

        if (i + 1) % PROGRESS_EVERY == 0 {
            info!(done = i + 1, total = kept.len(), "Normalization progress");
        }
    }

    info!(
        documents = corpora.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Built corpora"
    );
    Ok(corpora)
}
