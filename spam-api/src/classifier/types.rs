//! Classifier types and data structures

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Class assigned to a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Not spam (class 0)
    Ham,
    /// Spam (class 1)
    Spam,
}

impl Verdict {
    /// Wire label ("SPAM" / "HAM")
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Ham => "HAM",
            Verdict::Spam => "SPAM",
        }
    }

    pub fn is_spam(self) -> bool {
        self == Verdict::Spam
    }
}

/// Per-request word counts aligned to vocabulary indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector(Vec<u32>);

impl FeatureVector {
    /// All-zero vector of the given length
    pub fn zeros(len: usize) -> Self {
        Self(vec![0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn counts(&self) -> &[u32] {
        &self.0
    }

    /// Sum of all counts (number of in-vocabulary tokens)
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }

    pub(crate) fn increment(&mut self, idx: usize) {
        self.0[idx] += 1;
    }
}

/// Outcome of scoring a feature vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub verdict: Verdict,
    /// |score_spam - score_ham|, an unbounded log-odds magnitude
    pub confidence: f64,
    /// Log-probability of the spam class
    pub score_spam: f64,
    /// Log-probability of the ham class
    pub score_ham: f64,
}

/// Result of the full normalize -> vectorize -> classify pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub verdict: Verdict,
    pub confidence: f64,
    pub cleaned_words: Vec<String>,
    pub word_count: usize,
}

impl Prediction {
    pub fn is_spam(&self) -> bool {
        self.verdict.is_spam()
    }
}

/// Read-only summary of the loaded model
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub vocabulary_size: usize,
    pub prior_spam_probability: f64,
    pub features: usize,
    pub stopwords_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,
    pub loaded_at: DateTime<Utc>,
}
