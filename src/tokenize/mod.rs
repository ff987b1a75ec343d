//! Word tokenization with optional stopword and punctuation filtering.

pub mod dictionary;
pub mod newmm;
pub mod tcc;

use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

pub use dictionary::Dictionary;
pub use newmm::NewmmSegmenter;

/// Thai stopword list shipped with the crate.
pub const EMBEDDED_THAI_STOPWORDS: &str = include_str!("../../resources/thai_stopwords.txt");

/// ASCII punctuation characters.
pub const ASCII_PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Extra characters the service treats as punctuation: curly quotes, a
/// space and the emoji variation selector.
pub const DEFAULT_PUNCTUATION_EXTRA: &str = "“” \u{FE0F}";

#[derive(Debug, Error)]
pub enum TokenizeError {
    #[error("Input should be string")]
    InvalidInput,
}

/// Splits text without whitespace word boundaries into word units.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn from_list(list: &str) -> Self {
        let words = list
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty() && !w.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { words }
    }

    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self::from_list(&std::fs::read_to_string(path)?))
    }

    pub fn thai() -> Self {
        Self::from_list(EMBEDDED_THAI_STOPWORDS)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PunctuationSet {
    chars: HashSet<char>,
}

impl PunctuationSet {
    pub fn new(chars: &str) -> Self {
        Self {
            chars: chars.chars().collect(),
        }
    }

    /// ASCII punctuation plus `extra`.
    pub fn with_extra(extra: &str) -> Self {
        Self::new(&format!("{}{}", ASCII_PUNCTUATION, extra))
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// True when every character of `token` is punctuation.
    pub fn covers(&self, token: &str) -> bool {
        !token.is_empty() && token.chars().all(|c| self.contains(c))
    }
}

/// Segment `text` and clean up the resulting units.
pub fn tokenize(
    segmenter: &dyn Segmenter,
    text: &str,
    stopwords: Option<&StopwordSet>,
    punctuation: Option<&PunctuationSet>,
) -> Vec<String> {
    segmenter
        .segment(text)
        .into_iter()
        .map(|unit| unit.trim().to_string())
        .filter(|token| !token.is_empty())
        .filter(|token| stopwords.map_or(true, |s| !s.contains(token)))
        .filter(|token| punctuation.map_or(true, |p| !p.covers(token)))
        .collect()
}

/// Library entry point for untyped input: anything but a JSON string is
/// rejected. The HTTP layer checks the request body itself in
/// `api::validate_request` so it can name the missing key.
pub fn tokenize_value(
    segmenter: &dyn Segmenter,
    value: &serde_json::Value,
    stopwords: Option<&StopwordSet>,
    punctuation: Option<&PunctuationSet>,
) -> Result<Vec<String>, TokenizeError> {
    let text = value.as_str().ok_or(TokenizeError::InvalidInput)?;
    Ok(tokenize(segmenter, text, stopwords, punctuation))
}
