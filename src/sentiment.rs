//! Process-wide sentiment context: pipeline resources and the classifier,
//! built once at startup and shared read-only by every request.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::Config;
use crate::ml::{round_score, ScoredClassifier, TfidfLogisticModel};
use crate::preprocess::Preprocessor;
use crate::tokenize::{Dictionary, NewmmSegmenter, PunctuationSet, StopwordSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    pub label: String,
    /// Confidence rounded to three decimals.
    pub score: f64,
}

pub struct SentimentContext {
    preprocessor: Preprocessor,
    stopwords: StopwordSet,
    classifier: Box<dyn ScoredClassifier>,
}

impl SentimentContext {
    pub fn new(
        preprocessor: Preprocessor,
        stopwords: StopwordSet,
        classifier: Box<dyn ScoredClassifier>,
    ) -> Self {
        Self {
            preprocessor,
            stopwords,
            classifier,
        }
    }

    /// Load the lexicon, stopwords and model named by `config`.
    pub fn load(config: &Config) -> Result<Self> {
        let dictionary = match &config.dictionary_path {
            Some(path) => Dictionary::from_file(path)
                .with_context(|| format!("failed to load dictionary {}", path.display()))?,
            None => Dictionary::thai(),
        };
        tracing::info!("Dictionary loaded with {} words", dictionary.len());

        let stopwords = match &config.stopwords_path {
            Some(path) => StopwordSet::from_file(path)
                .with_context(|| format!("failed to load stopwords {}", path.display()))?,
            None => StopwordSet::thai(),
        };
        tracing::info!("Stopwords loaded: {}", stopwords.len());

        let model = TfidfLogisticModel::from_file(&config.model_path)
            .with_context(|| format!("failed to load model {}", config.model_path.display()))?;
        tracing::info!(
            "Model loaded from {} (labels: {:?}, vocabulary: {})",
            config.model_path.display(),
            model.labels,
            model.vocabulary.len()
        );

        let preprocessor = Preprocessor::new(
            Box::new(NewmmSegmenter::new(dictionary)),
            PunctuationSet::with_extra(&config.punctuation_extra),
        );

        Ok(Self::new(preprocessor, stopwords, Box::new(model)))
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    pub fn labels(&self) -> &[String] {
        self.classifier.labels()
    }

    pub fn transform(&self, text: &str) -> Vec<String> {
        self.preprocessor.transform(text)
    }

    pub fn classify(&self, text: &str) -> SentimentResult {
        let tokens = self.transform(text);
        let prediction = self.classifier.predict(&tokens);
        tracing::debug!(
            "{} tokens -> {} ({:.3})",
            tokens.len(),
            prediction.label,
            prediction.confidence
        );
        SentimentResult {
            label: prediction.label,
            score: round_score(prediction.confidence),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ml::tests::TEST_MODEL;
    use crate::tokenize::DEFAULT_PUNCTUATION_EXTRA;

    pub(crate) fn test_context() -> SentimentContext {
        let dictionary = Dictionary::from_word_list("ดี\nแย่\nมาก\nอาหาร");
        let preprocessor = Preprocessor::new(
            Box::new(NewmmSegmenter::new(dictionary)),
            PunctuationSet::with_extra(DEFAULT_PUNCTUATION_EXTRA),
        );
        let model = TfidfLogisticModel::from_json(TEST_MODEL).unwrap();
        SentimentContext::new(preprocessor, StopwordSet::thai(), Box::new(model))
    }

    #[test]
    fn test_classify() {
        let ctx = test_context();
        let result = ctx.classify("อาหารดีมาก 555");
        assert_eq!(result.label, "pos");
        assert!((0.0..=1.0).contains(&result.score));

        assert_eq!(ctx.classify("แย่มาก").label, "neg");
    }

    #[test]
    fn test_score_has_three_decimals() {
        let result = test_context().classify("ดี");
        assert_eq!(result.score, round_score(result.score));
    }

    #[test]
    fn test_load_reports_missing_model() {
        let config = Config {
            model_path: "does/not/exist.json".into(),
            ..Config::default()
        };
        let err = SentimentContext::load(&config).err().unwrap();
        assert!(err.to_string().contains("failed to load model"));
    }

    #[test]
    fn test_load_honors_stopwords_path() {
        let config = Config {
            stopwords_path: Some("does/not/stopwords.txt".into()),
            ..Config::default()
        };
        let err = SentimentContext::load(&config).err().unwrap();
        assert!(err.to_string().contains("failed to load stopwords"));
    }

    #[test]
    fn test_stopwords_exposed_for_filtering() {
        let ctx = test_context();
        let tokens = ctx.transform("อาหารดีมาก");
        let content: Vec<&String> = tokens
            .iter()
            .filter(|t| !ctx.stopwords().contains(t))
            .collect();
        assert!(ctx.stopwords().contains("และ"));
        assert_eq!(content.len(), tokens.len());
    }
}
