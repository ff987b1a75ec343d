//! Sentiment classifier over token sequences.
//!
//! The model is a TF-IDF vectorizer followed by logistic regression,
//! exported to JSON. It is loaded once at startup and only read
//! afterwards, so one instance is shared by every request.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode model artifact: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid model artifact: {0}")]
    Shape(String),
}

/// Result of classifying one token sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: String,
    /// Probability of `label`, in [0, 1].
    pub confidence: f64,
    pub probabilities: Vec<(String, f64)>,
}

/// Maps a token sequence to a label and a confidence.
pub trait ScoredClassifier: Send + Sync {
    fn labels(&self) -> &[String];
    fn predict(&self, tokens: &[String]) -> Prediction;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    #[default]
    Multinomial,
    Ovr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

/// TF-IDF + logistic regression weights as stored on disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TfidfLogisticModel {
    pub labels: Vec<String>,
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    /// One row per label, or a single row for a binary model.
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
    #[serde(default)]
    pub multi_class: MultiClass,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

impl TfidfLogisticModel {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(raw)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.labels.len() < 2 {
            return Err(ModelError::Shape("need at least two labels".to_string()));
        }
        let binary = self.labels.len() == 2 && self.coefficients.len() == 1;
        if !binary && self.coefficients.len() != self.labels.len() {
            return Err(ModelError::Shape(format!(
                "{} coefficient rows for {} labels",
                self.coefficients.len(),
                self.labels.len()
            )));
        }
        if self.intercepts.len() != self.coefficients.len() {
            return Err(ModelError::Shape(format!(
                "{} intercepts for {} coefficient rows",
                self.intercepts.len(),
                self.coefficients.len()
            )));
        }
        let columns = self.idf.len();
        if let Some(row) = self.coefficients.iter().find(|row| row.len() != columns) {
            return Err(ModelError::Shape(format!(
                "coefficient row has {} columns, idf has {}",
                row.len(),
                columns
            )));
        }
        if let Some((token, idx)) = self.vocabulary.iter().find(|(_, idx)| **idx >= columns) {
            return Err(ModelError::Shape(format!(
                "vocabulary entry '{}' points at column {} of {}",
                token, idx, columns
            )));
        }
        if let Some(column) = self.idf.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::Shape(format!("idf column {} is not finite", column)));
        }
        // A row whose magnitude overflows can turn a decision score into inf - inf.
        let rows = self.coefficients.iter().zip(&self.intercepts);
        for (row, (weights, intercept)) in rows.enumerate() {
            let magnitude = intercept.abs() + weights.iter().map(|w| w.abs()).sum::<f64>();
            if !magnitude.is_finite() {
                return Err(ModelError::Shape(format!(
                    "coefficient row {} has non-finite or overflowing weights",
                    row
                )));
            }
        }
        Ok(())
    }

    /// Sparse TF-IDF vector of `tokens`; unknown tokens are ignored.
    fn vectorize(&self, tokens: &[String]) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (idx, tf * self.idf[idx])
            })
            .collect();
        features.sort_by_key(|(idx, _)| *idx);

        if self.norm == Norm::L2 {
            let length = features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
            if length > 0.0 {
                for (_, v) in features.iter_mut() {
                    *v /= length;
                }
            }
        }
        features
    }

    fn decision(&self, features: &[(usize, f64)]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| {
                intercept + features.iter().map(|(idx, v)| row[*idx] * v).sum::<f64>()
            })
            .collect()
    }

    fn probabilities(&self, scores: &[f64]) -> Vec<f64> {
        if scores.len() == 1 {
            let positive = sigmoid(scores[0]);
            return vec![1.0 - positive, positive];
        }
        match self.multi_class {
            MultiClass::Multinomial => softmax(scores),
            MultiClass::Ovr => {
                let raw: Vec<f64> = scores.iter().map(|&s| sigmoid(s)).collect();
                let total: f64 = raw.iter().sum();
                raw.into_iter().map(|p| p / total).collect()
            }
        }
    }
}

impl ScoredClassifier for TfidfLogisticModel {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn predict(&self, tokens: &[String]) -> Prediction {
        let features = self.vectorize(tokens);
        let probabilities = self.probabilities(&self.decision(&features));

        // first label wins ties
        let (best, confidence) = probabilities.iter().copied().enumerate().fold(
            (0, f64::MIN),
            |(bi, bp), (i, p)| if p > bp { (i, p) } else { (bi, bp) },
        );

        Prediction {
            label: self.labels[best].clone(),
            confidence,
            probabilities: self.labels.iter().cloned().zip(probabilities).collect(),
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Round to three decimal places, as the API reports scores.
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}
