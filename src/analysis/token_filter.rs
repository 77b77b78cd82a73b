//! Token filters applied to the tokenizer output, in list order.

use super::tokenizer::Token;
use std::collections::HashSet;

/// Canonical form every numeral collapses to.
pub const ZERO_TOKEN: &str = "0";
/// Reading of [`ZERO_TOKEN`].
pub const ZERO_READING: &str = "ゼロ";

/// Trait for rewrites and drops over a token stream.
pub trait TokenFilter: Send + Sync {
    fn apply(&self, tokens: Vec<Token>) -> Vec<Token>;

    fn name(&self) -> &'static str;
}

/// Rewrites every `名詞,数` token to [`ZERO_TOKEN`] so numeric variation does
/// not grow the vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericReplaceFilter;

impl TokenFilter for NumericReplaceFilter {
    fn apply(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .map(|mut token| {
                if token.pos() == "名詞" && token.pos_detail() == "数" {
                    token.surface = ZERO_TOKEN.to_string();
                    token.base_form = ZERO_TOKEN.to_string();
                    token.reading = ZERO_READING.to_string();
                    token.phonetic = ZERO_READING.to_string();
                }
                token
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "numeric_replace"
    }
}

/// Keeps only tokens whose top-level POS is listed.
#[derive(Debug, Clone, Default)]
pub struct PosKeepFilter {
    keep: HashSet<String>,
}

impl PosKeepFilter {
    pub fn new<I, S>(keep: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keep: keep.into_iter().map(Into::into).collect(),
        }
    }
}

impl TokenFilter for PosKeepFilter {
    fn apply(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .filter(|token| self.keep.contains(token.pos()))
            .collect()
    }

    fn name(&self) -> &'static str {
        "pos_keep"
    }
}

/// Lowercases surface and base forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerCaseFilter;

impl TokenFilter for LowerCaseFilter {
    fn apply(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .map(|mut token| {
                token.surface = token.surface.to_lowercase();
                token.base_form = token.base_form.to_lowercase();
                token
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_replace() {
        let tokens = vec![
            Token::new("2019", "2019", "名詞,数,*,*"),
            Token::new("年", "年", "名詞,接尾,助数詞,*"),
        ];
        let out = NumericReplaceFilter.apply(tokens);
        assert_eq!(out[0].surface, "0");
        assert_eq!(out[0].base_form, "0");
        assert_eq!(out[0].reading, "ゼロ");
        assert_eq!(out[0].phonetic, "ゼロ");
        assert_eq!(out[1].surface, "年");
    }

    #[test]
    fn test_numeric_replace_is_idempotent() {
        let tokens = vec![Token::new("3", "3", "名詞,数,*,*")];
        let once = NumericReplaceFilter.apply(tokens);
        let twice = NumericReplaceFilter.apply(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_pos_keep() {
        let filter = PosKeepFilter::new(["名詞", "動詞"]);
        let tokens = vec![
            Token::new("猫", "猫", "名詞,一般,*,*"),
            Token::new("が", "が", "助詞,格助詞,一般,*"),
            Token::new("走っ", "走る", "動詞,自立,*,*"),
        ];
        let kept: Vec<String> = filter
            .apply(tokens)
            .into_iter()
            .map(|t| t.base_form)
            .collect();
        assert_eq!(kept, vec!["猫", "走る"]);
    }

    #[test]
    fn test_lowercase_touches_surface_and_base() {
        let out = LowerCaseFilter.apply(vec![Token::new("Rust", "Rust", "名詞,一般,*,*")]);
        assert_eq!(out[0].surface, "rust");
        assert_eq!(out[0].base_form, "rust");
    }
}
