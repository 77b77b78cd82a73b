//! Text-to-token analysis.
//!
//! An [`Analyzer`] folds an ordered list of [`CharFilter`]s over the raw body,
//! hands the result to a [`MorphologicalTokenizer`], then folds an ordered list
//! of [`TokenFilter`]s over the token stream. A [`Normalizer`] wraps an
//! analyzer built from a [`TokenFilterConfig`] and applies the final
//! stopword/subcategory exclusion and output-form selection.
//!
//! ```text
//! body ─▶ NFKC ─▶ -URL ─▶ -*.jp ─▶ -custom ─▶ tokenizer
//!      ─▶ numeric→0 ─▶ POS keep ─▶ lowercase ─▶ exclude ─▶ Vec<String>
//! ```
//!
//! # Submodules
//!
//! - [`char_filter`]: Character-level rewrites applied before tokenization
//! - [`tokenizer`]: Token type and the morphological tokenizer capability
//! - [`token_filter`]: Token-level rewrites and drops
//! - [`normalizer`]: Filter profiles and the per-document entry point

pub mod char_filter;
pub mod normalizer;
pub mod token_filter;
pub mod tokenizer;

pub use char_filter::CharFilter;
pub use normalizer::{Normalizer, OutputForm, TokenFilterConfig};
pub use token_filter::TokenFilter;
pub use tokenizer::{MorphologicalTokenizer, Token};

use crate::error::Result;
use std::fmt;
use std::sync::Arc;

/// Char filters, a tokenizer and token filters applied in a fixed order.
pub struct Analyzer {
    char_filters: Vec<Box<dyn CharFilter>>,
    tokenizer: Arc<dyn MorphologicalTokenizer>,
    token_filters: Vec<Box<dyn TokenFilter>>,
}

impl Analyzer {
    pub fn new(
        char_filters: Vec<Box<dyn CharFilter>>,
        tokenizer: Arc<dyn MorphologicalTokenizer>,
        token_filters: Vec<Box<dyn TokenFilter>>,
    ) -> Self {
        Self {
            char_filters,
            tokenizer,
            token_filters,
        }
    }

    /// Run only the char filter chain.
    pub fn rewrite(&self, text: &str) -> String {
        self.char_filters
            .iter()
            .fold(text.to_string(), |acc, filter| filter.apply(&acc))
    }

    /// Run the full chain over `text`.
    pub fn analyze(&self, text: &str) -> Result<Vec<Token>> {
        let rewritten = self.rewrite(text);
        let tokens = self.tokenizer.tokenize(&rewritten)?;
        Ok(self
            .token_filters
            .iter()
            .fold(tokens, |acc, filter| filter.apply(acc)))
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let char_filters: Vec<&str> = self.char_filters.iter().map(|c| c.name()).collect();
        let token_filters: Vec<&str> = self.token_filters.iter().map(|t| t.name()).collect();
        f.debug_struct("Analyzer")
            .field("char_filters", &char_filters)
            .field("tokenizer", &self.tokenizer.name())
            .field("token_filters", &token_filters)
            .finish()
    }
}
