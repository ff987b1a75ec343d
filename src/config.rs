//! Service configuration read from the environment (and `.env`).

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::tokenize::DEFAULT_PUNCTUATION_EXTRA;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8204";
pub const DEFAULT_MODEL_PATH: &str = "models/sentiment_model.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Serialized classifier, loaded once at startup.
    pub model_path: PathBuf,
    /// Word list replacing the embedded Thai lexicon.
    pub dictionary_path: Option<PathBuf>,
    /// Stopword list replacing the embedded Thai stopwords.
    pub stopwords_path: Option<PathBuf>,
    /// Characters treated as punctuation on top of ASCII punctuation.
    pub punctuation_extra: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.parse().expect("valid default address"),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            dictionary_path: None,
            stopwords_path: None,
            punctuation_extra: DEFAULT_PUNCTUATION_EXTRA.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("BIND_ADDR") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid BIND_ADDR '{}', using {}", raw, DEFAULT_BIND_ADDR);
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        Self {
            bind_addr,
            model_path: get("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            dictionary_path: get("DICTIONARY_PATH").map(PathBuf::from),
            stopwords_path: get("STOPWORDS_PATH").map(PathBuf::from),
            // no blank filter here: a lone space is a meaningful value
            punctuation_extra: lookup("PUNCTUATION_EXTRA").unwrap_or(defaults.punctuation_extra),
        }
    }
}
