//! Filter profiles and the per-document normalizer.
//!
//! A [`TokenFilterConfig`] names everything that differs between the two
//! corpora built from an article body:
//!
//! | Profile | POS kept | Subcategories dropped | Stopwords | Emits |
//! |---------|----------|-----------------------|-----------|-------|
//! | [`bag_of_words`](TokenFilterConfig::bag_of_words) | 名詞, 動詞, 形容詞 | 接尾, 数, サ変接続 | yes | base form |
//! | [`text`](TokenFilterConfig::text) | all | 接尾, サ変接続, 空白 | no | surface |

use super::Analyzer;
use super::char_filter::{
    CharFilter, RegexReplaceCharFilter, UnicodeNormalizeCharFilter, jp_domain_filter, url_filter,
};
use super::token_filter::{LowerCaseFilter, NumericReplaceFilter, PosKeepFilter, TokenFilter};
use super::tokenizer::{MorphologicalTokenizer, Token};
use crate::error::Result;
use crate::stopwords::StopwordSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Which token field a profile emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputForm {
    BaseForm,
    Surface,
}

/// One filter profile.
///
/// When given in the YAML config a profile replaces the preset entirely;
/// omitted fields take the empty value, not the preset's.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenFilterConfig {
    /// Top-level POS categories to keep; `None` keeps everything.
    #[serde(default)]
    pub include_pos: Option<Vec<String>>,
    /// POS subcategories dropped after analysis.
    #[serde(default)]
    pub exclude_posdetail: Vec<String>,
    /// Extra pattern deleted before tokenization; `None` deletes nothing.
    #[serde(default)]
    pub exclude_regex: Option<String>,
    /// Drop tokens whose base form is a stopword.
    #[serde(default)]
    pub use_stopwords: bool,
    pub output: OutputForm,
}

impl TokenFilterConfig {
    /// Content words only, stopword-filtered, base forms.
    pub fn bag_of_words() -> Self {
        Self {
            include_pos: Some(strings(&["名詞", "動詞", "形容詞"])),
            exclude_posdetail: strings(&["接尾", "数", "サ変接続"]),
            exclude_regex: None,
            use_stopwords: true,
            output: OutputForm::BaseForm,
        }
    }

    /// Every part of speech except boilerplate subcategories, surface forms.
    pub fn text() -> Self {
        Self {
            include_pos: None,
            exclude_posdetail: strings(&["接尾", "サ変接続", "空白"]),
            exclude_regex: None,
            use_stopwords: false,
            output: OutputForm::Surface,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Turns an article body into the token list of one profile.
pub struct Normalizer {
    analyzer: Analyzer,
    exclude_posdetail: HashSet<String>,
    stopwords: Option<Arc<StopwordSet>>,
    output: OutputForm,
}

impl Normalizer {
    /// Build the filter chains for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `exclude_regex` does not compile.
    pub fn new(
        config: &TokenFilterConfig,
        tokenizer: Arc<dyn MorphologicalTokenizer>,
        stopwords: Arc<StopwordSet>,
    ) -> Result<Self> {
        let mut char_filters: Vec<Box<dyn CharFilter>> = vec![
            Box::new(UnicodeNormalizeCharFilter),
            Box::new(url_filter()),
            Box::new(jp_domain_filter()),
        ];
        if let Some(pattern) = &config.exclude_regex {
            char_filters.push(Box::new(RegexReplaceCharFilter::new(pattern, "")?));
        }

        let mut token_filters: Vec<Box<dyn TokenFilter>> = vec![Box::new(NumericReplaceFilter)];
        if let Some(pos) = &config.include_pos {
            token_filters.push(Box::new(PosKeepFilter::new(pos.iter().cloned())));
        }
        token_filters.push(Box::new(LowerCaseFilter));

        Ok(Self {
            analyzer: Analyzer::new(char_filters, tokenizer, token_filters),
            exclude_posdetail: config.exclude_posdetail.iter().cloned().collect(),
            stopwords: config.use_stopwords.then_some(stopwords),
            output: config.output,
        })
    }

    /// Tokens of `text` in tokenizer order.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let tokens = self.analyzer.analyze(text)?;
        Ok(tokens
            .into_iter()
            .filter(|token| self.keeps(token))
            .map(|token| match self.output {
                OutputForm::BaseForm => token.base_form,
                OutputForm::Surface => token.surface,
            })
            .collect())
    }

    fn keeps(&self, token: &Token) -> bool {
        if self.exclude_posdetail.contains(token.pos_detail()) {
            return false;
        }
        match &self.stopwords {
            Some(stopwords) => !stopwords.contains(&token.base_form),
            None => true,
        }
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::ScriptRunTokenizer;

    /// Ignores its input and replays a fixed IPADIC-style analysis.
    struct FixedTokenizer(Vec<Token>);

    impl MorphologicalTokenizer for FixedTokenizer {
        fn tokenize(&self, _text: &str) -> Result<Vec<Token>> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn neko_no_hon() -> Arc<dyn MorphologicalTokenizer> {
        Arc::new(FixedTokenizer(vec![
            Token::new("猫", "猫", "名詞,一般,*,*"),
            Token::new("の", "の", "名詞,非自立,一般,*"),
            Token::new("本", "本", "名詞,一般,*,*"),
            Token::new("3", "3", "名詞,数,*,*"),
            Token::new("冊", "冊", "名詞,接尾,助数詞,*"),
            Token::new("読ん", "読む", "動詞,自立,*,*"),
            Token::new("だ", "だ", "助動詞,*,*,*"),
            Token::new(" ", " ", "記号,空白,*,*"),
        ]))
    }

    fn stopwords(words: &[&str]) -> Arc<StopwordSet> {
        Arc::new(StopwordSet::from_words(words.iter().copied()))
    }

    #[test]
    fn test_bag_of_words_drops_stopwords_and_subcategories() {
        let normalizer = Normalizer::new(
            &TokenFilterConfig::bag_of_words(),
            neko_no_hon(),
            stopwords(&["の"]),
        )
        .unwrap();
        assert_eq!(
            normalizer.tokenize("ignored").unwrap(),
            vec!["猫", "本", "読む"]
        );
    }

    #[test]
    fn test_text_never_checks_stopwords() {
        let normalizer =
            Normalizer::new(&TokenFilterConfig::text(), neko_no_hon(), stopwords(&["の"]))
                .unwrap();
        assert_eq!(
            normalizer.tokenize("ignored").unwrap(),
            vec!["猫", "の", "本", "0", "読ん", "だ"]
        );
    }

    #[test]
    fn test_custom_exclusion_pattern() {
        let config = TokenFilterConfig {
            exclude_regex: Some(r"```[^`]*```".to_string()),
            ..TokenFilterConfig::text()
        };
        let normalizer =
            Normalizer::new(&config, Arc::new(ScriptRunTokenizer), stopwords(&[])).unwrap();
        assert_eq!(
            normalizer.tokenize("前```let x = 1;```の後").unwrap(),
            vec!["前", "の", "後"]
        );
    }

    #[test]
    fn test_invalid_exclusion_pattern_fails_construction() {
        let config = TokenFilterConfig {
            exclude_regex: Some("[".to_string()),
            ..TokenFilterConfig::text()
        };
        assert!(Normalizer::new(&config, Arc::new(ScriptRunTokenizer), stopwords(&[])).is_err());
    }

    #[test]
    fn test_zero_token_survives_renormalization() {
        let normalizer = Normalizer::new(
            &TokenFilterConfig::text(),
            Arc::new(ScriptRunTokenizer),
            stopwords(&[]),
        )
        .unwrap();
        let once = normalizer.tokenize("版2019と１２").unwrap();
        assert_eq!(once, vec!["版", "0", "と", "0"]);
        let twice = normalizer.tokenize(&once.join("")).unwrap();
        assert_eq!(twice, vec!["版", "0", "と", "0"]);
    }

    #[test]
    fn test_end_to_end_body() {
        let tokenizer: Arc<dyn MorphologicalTokenizer> = Arc::new(ScriptRunTokenizer);
        let body = "これは https://example.jp/x を見た。3つ。";

        let bow = Normalizer::new(
            &TokenFilterConfig::bag_of_words(),
            tokenizer.clone(),
            stopwords(&[]),
        )
        .unwrap()
        .tokenize(body)
        .unwrap();
        let text = Normalizer::new(&TokenFilterConfig::text(), tokenizer, stopwords(&[]))
            .unwrap()
            .tokenize(body)
            .unwrap();

        for tokens in [&bow, &text] {
            assert!(!tokens.iter().any(|t| t.contains("example") || t.contains("https")));
        }
        assert_eq!(bow, vec!["x", "見"]);
        assert!(!bow.contains(&"0".to_string()));
        assert_eq!(
            text,
            vec!["これは", "/", "x", "を", "見", "た", "。", "0", "つ", "。"]
        );
    }

    #[test]
    fn test_profile_from_yaml() {
        let yaml = r#"
include_pos: ["名詞"]
exclude_posdetail: ["数"]
use_stopwords: true
output: base_form
"#;
        let config: TokenFilterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.include_pos, Some(vec!["名詞".to_string()]));
        assert_eq!(config.exclude_regex, None);
        assert_eq!(config.output, OutputForm::BaseForm);
    }
}
