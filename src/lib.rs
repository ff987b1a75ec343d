//! Thai social-media sentiment service.
//!
//! Raw text goes through a fixed normalization pipeline
//! ([`preprocess::Preprocessor::transform`]), is segmented into words by a
//! dictionary-based segmenter ([`tokenize`]), and the resulting tokens are
//! scored by a TF-IDF + logistic regression model ([`ml`]).

pub mod api;
pub mod config;
pub mod ml;
pub mod preprocess;
pub mod sentiment;
pub mod tokenize;
