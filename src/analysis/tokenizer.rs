//! Morphological tokenizer capability.
//!
//! A tokenizer turns text into [`Token`]s carrying surface form, base form,
//! reading, phonetic reading and an IPADIC-style part-of-speech label such as
//! `名詞,数,*,*`.
//!
//! Two implementations exist:
//! - `LinderaTokenizer` (feature `ipadic`): dictionary-backed analysis
//! - [`ScriptRunTokenizer`]: dictionary-free fallback that splits on script changes

use crate::error::Result;
use std::sync::Arc;

/// Placeholder used by IPADIC for an empty feature field.
pub const EMPTY_FIELD: &str = "*";

/// Sole detail lindera reports for a word missing from the dictionary.
pub const UNKNOWN_DETAIL: &str = "UNK";

/// One morphological token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub base_form: String,
    pub reading: String,
    pub phonetic: String,
    /// Comma-joined category fields, top level first.
    pub part_of_speech: String,
}

impl Token {
    pub fn new(surface: &str, base_form: &str, part_of_speech: &str) -> Self {
        Token {
            surface: surface.to_string(),
            base_form: base_form.to_string(),
            reading: EMPTY_FIELD.to_string(),
            phonetic: EMPTY_FIELD.to_string(),
            part_of_speech: part_of_speech.to_string(),
        }
    }

    /// Top-level POS category, e.g. `名詞`.
    pub fn pos(&self) -> &str {
        self.part_of_speech.split(',').next().unwrap_or(EMPTY_FIELD)
    }

    /// First POS subcategory, e.g. `数`. Labels without one yield `*`.
    pub fn pos_detail(&self) -> &str {
        self.part_of_speech.split(',').nth(1).unwrap_or(EMPTY_FIELD)
    }
}

/// Trait for tokenizers that split text into morphological tokens.
pub trait MorphologicalTokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;

    fn name(&self) -> &'static str;
}

/// The tokenizer used when none is injected.
///
/// With the `ipadic` feature (on by default) this is the lindera IPADIC
/// analyzer. Builds with `--no-default-features` get the script-run fallback,
/// which yields no base forms for inflected words.
pub fn default_tokenizer() -> Result<Arc<dyn MorphologicalTokenizer>> {
    #[cfg(feature = "ipadic")]
    {
        Ok(Arc::new(lindera_ipadic::LinderaTokenizer::new()?))
    }
    #[cfg(not(feature = "ipadic"))]
    {
        tracing::warn!(
            "Built without the `ipadic` feature; falling back to script-run segmentation, verbs and adjectives keep their surface forms"
        );
        Ok(Arc::new(ScriptRunTokenizer))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Kanji,
    Hiragana,
    Katakana,
    Letter,
    Digit,
    Space,
    Symbol,
}

impl Script {
    fn of(c: char) -> Script {
        match c {
            '\u{3041}'..='\u{309F}' => Script::Hiragana,
            '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' => Script::Katakana,
            '\u{3005}' | '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}' => {
                Script::Kanji
            }
            c if c.is_whitespace() => Script::Space,
            c if c.is_numeric() => Script::Digit,
            c if c.is_alphabetic() || c == '_' => Script::Letter,
            _ => Script::Symbol,
        }
    }

    fn part_of_speech(self) -> &'static str {
        match self {
            Script::Kanji | Script::Katakana | Script::Letter => "名詞,一般,*,*",
            Script::Hiragana => "助詞,*,*,*",
            Script::Digit => "名詞,数,*,*",
            Script::Space => "記号,空白,*,*",
            Script::Symbol => "記号,一般,*,*",
        }
    }

    /// IPADIC `unk.def` category for an out-of-dictionary word of this class.
    fn unknown_part_of_speech(self) -> &'static str {
        match self {
            Script::Letter => "名詞,固有名詞,組織,*",
            Script::Kanji | Script::Katakana | Script::Hiragana => "名詞,一般,*,*",
            Script::Digit => "名詞,数,*,*",
            Script::Space => "記号,空白,*,*",
            Script::Symbol => "記号,一般,*,*",
        }
    }

    /// Symbols never merge with their neighbours.
    fn groups(self) -> bool {
        self != Script::Symbol
    }
}

/// POS label for an out-of-dictionary word, chosen by the character class of
/// its first character as IPADIC's unknown-word definitions do.
pub fn unknown_word_pos(surface: &str) -> &'static str {
    surface
        .chars()
        .next()
        .map_or(EMPTY_FIELD, |c| Script::of(c).unknown_part_of_speech())
}

/// Splits text into maximal runs of one script class.
///
/// Kanji, katakana and latin runs are labelled as common nouns, hiragana runs
/// as particles, digit runs as numerals. Base form equals surface form and
/// readings are empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptRunTokenizer;

impl MorphologicalTokenizer for ScriptRunTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut run_start = 0;
        let mut run_script: Option<Script> = None;

        for (i, c) in text.char_indices() {
            let script = Script::of(c);
            if let Some(current) = run_script {
                if current != script || !script.groups() {
                    let surface = &text[run_start..i];
                    tokens.push(Token::new(surface, surface, current.part_of_speech()));
                    run_start = i;
                }
            }
            run_script = Some(script);
        }
        if let Some(current) = run_script {
            let surface = &text[run_start..];
            tokens.push(Token::new(surface, surface, current.part_of_speech()));
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "script_run"
    }
}

#[cfg(feature = "ipadic")]
mod lindera_ipadic {
    use super::{EMPTY_FIELD, MorphologicalTokenizer, Token, UNKNOWN_DETAIL, unknown_word_pos};
    use crate::error::{CorpusError, Result};
    use lindera::dictionary::{DictionaryKind, load_dictionary_from_kind};
    use lindera::mode::Mode;
    use lindera::segmenter::Segmenter;
    use lindera::tokenizer::Tokenizer;

    /// IPADIC analysis through lindera.
    ///
    /// Detail fields: POS (4), conjugation type, conjugation form, base form,
    /// reading, pronunciation. Unknown words carry only `UNK` and are labelled
    /// by character class instead.
    pub struct LinderaTokenizer {
        inner: Tokenizer,
    }

    impl LinderaTokenizer {
        pub fn new() -> Result<Self> {
            let dictionary = load_dictionary_from_kind(DictionaryKind::IPADIC)
                .map_err(|e| CorpusError::Tokenizer(e.to_string()))?;
            let segmenter = Segmenter::new(Mode::Normal, dictionary, None);
            Ok(Self {
                inner: Tokenizer::new(segmenter),
            })
        }
    }

    impl MorphologicalTokenizer for LinderaTokenizer {
        fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
            let mut tokens = self
                .inner
                .tokenize(text)
                .map_err(|e| CorpusError::Tokenizer(e.to_string()))?;

            Ok(tokens
                .iter_mut()
                .map(|token| {
                    let surface = token.text.to_string();
                    let details = token.details();
                    if details.first() == Some(&UNKNOWN_DETAIL) {
                        let pos = unknown_word_pos(&surface);
                        return Token::new(&surface, &surface, pos);
                    }
                    let field = |i: usize| details.get(i).copied().unwrap_or(EMPTY_FIELD);
                    let pos = details.iter().take(4).copied().collect::<Vec<_>>().join(",");
                    let base_form = match field(6) {
                        EMPTY_FIELD => surface.clone(),
                        base => base.to_string(),
                    };
                    Token {
                        base_form,
                        reading: field(7).to_string(),
                        phonetic: field(8).to_string(),
                        part_of_speech: pos,
                        surface,
                    }
                })
                .collect())
        }

        fn name(&self) -> &'static str {
            "lindera_ipadic"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surfaces(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.surface.as_str()).collect()
    }

    #[test]
    fn test_pos_fields() {
        let token = Token::new("3", "3", "名詞,数,*,*");
        assert_eq!(token.pos(), "名詞");
        assert_eq!(token.pos_detail(), "数");

        let unknown = Token::new("x", "x", "UNK");
        assert_eq!(unknown.pos(), "UNK");
        assert_eq!(unknown.pos_detail(), "*");
    }

    #[test]
    fn test_script_runs() {
        let tokens = ScriptRunTokenizer.tokenize("Rustで並行処理を書く 2回").unwrap();
        assert_eq!(
            surfaces(&tokens),
            vec!["Rust", "で", "並行処理", "を", "書", "く", " ", "2", "回"]
        );
        assert_eq!(tokens[0].pos(), "名詞");
        assert_eq!(tokens[1].pos(), "助詞");
        assert_eq!(tokens[6].pos_detail(), "空白");
        assert_eq!(tokens[7].pos_detail(), "数");
    }

    #[test]
    fn test_symbols_do_not_merge() {
        let tokens = ScriptRunTokenizer.tokenize("a()b").unwrap();
        assert_eq!(surfaces(&tokens), vec!["a", "(", ")", "b"]);
        assert!(ScriptRunTokenizer.tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_word_pos_by_character_class() {
        assert_eq!(unknown_word_pos("3"), "名詞,数,*,*");
        assert_eq!(unknown_word_pos("2019"), "名詞,数,*,*");
        assert_eq!(unknown_word_pos("Python"), "名詞,固有名詞,組織,*");
        assert_eq!(unknown_word_pos("ラズパイ"), "名詞,一般,*,*");
        assert_eq!(unknown_word_pos("#"), "記号,一般,*,*");
        assert_eq!(unknown_word_pos(""), EMPTY_FIELD);
    }

    #[test]
    fn test_katakana_keeps_prolonged_sound_mark() {
        let tokens = ScriptRunTokenizer.tokenize("データ").unwrap();
        assert_eq!(surfaces(&tokens), vec!["データ"]);
    }
}
