//! Model artifact loading and validation
//!
//! The artifact is produced by an external training step. Any encoding
//! that decodes into [`ArtifactFile`] is accepted; the format is picked
//! from the file extension (`.toml`, otherwise JSON).

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

use crate::error::{ClassifierError, Result};

/// On-disk layout of a trained model
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtifactFile {
    /// Ordered vocabulary; position is the feature index
    pub vocabulary: Vec<String>,
    /// Inverse of `vocabulary`
    pub word_to_idx: HashMap<String, usize>,
    /// Words dropped during normalization
    pub stop_words: HashSet<String>,
    /// P(word | ham)
    pub p0_vector: Vec<f64>,
    /// P(word | spam)
    pub p1_vector: Vec<f64>,
    /// Spam prior
    pub p_spam: f64,
}

impl ArtifactFile {
    /// Build an artifact file, deriving `word_to_idx` from the vocabulary
    pub fn new(
        vocabulary: Vec<String>,
        stop_words: HashSet<String>,
        p0_vector: Vec<f64>,
        p1_vector: Vec<f64>,
        p_spam: f64,
    ) -> Self {
        let word_to_idx = vocabulary
            .iter()
            .enumerate()
            .map(|(idx, word)| (word.clone(), idx))
            .collect();

        Self {
            vocabulary,
            word_to_idx,
            stop_words,
            p0_vector,
            p1_vector,
            p_spam,
        }
    }
}

/// Supported artifact encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Toml,
}

impl ArtifactFormat {
    /// Pick the encoding from the file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ArtifactFormat::Toml,
            _ => ArtifactFormat::Json,
        }
    }

    /// Decode artifact contents
    pub fn decode(self, content: &str) -> Result<ArtifactFile> {
        match self {
            ArtifactFormat::Json => serde_json::from_str(content).map_err(|e| {
                ClassifierError::CorruptArtifact(format!("invalid JSON artifact: {}", e))
            }),
            ArtifactFormat::Toml => toml::from_str(content).map_err(|e| {
                ClassifierError::CorruptArtifact(format!("invalid TOML artifact: {}", e))
            }),
        }
    }
}

/// Validated, immutable model
///
/// Log-probabilities are cached at construction so scoring is a pair of
/// dot products.
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    vocabulary: Vec<String>,
    word_to_idx: HashMap<String, usize>,
    stop_words: HashSet<String>,
    p0_vector: Vec<f64>,
    p1_vector: Vec<f64>,
    p_spam: f64,
    log_p0: Vec<f64>,
    log_p1: Vec<f64>,
    log_prior_ham: f64,
    log_prior_spam: f64,
}

impl ModelArtifact {
    /// Read, decode and validate an artifact from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ClassifierError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ClassifierError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::InvalidData => {
                ClassifierError::CorruptArtifact(format!("artifact is not valid UTF-8: {}", e))
            }
            _ => ClassifierError::CorruptArtifact(format!("artifact could not be read: {}", e)),
        })?;

        let format = ArtifactFormat::from_path(path);
        debug!("Decoding {:?} artifact from {}", format, path.display());

        Self::try_from(format.decode(&content)?)
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Feature index of a word, if it is in the vocabulary
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.word_to_idx.get(word).copied()
    }

    pub fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn p0_vector(&self) -> &[f64] {
        &self.p0_vector
    }

    pub fn p1_vector(&self) -> &[f64] {
        &self.p1_vector
    }

    pub fn p_spam(&self) -> f64 {
        self.p_spam
    }

    pub(crate) fn log_p0(&self) -> &[f64] {
        &self.log_p0
    }

    pub(crate) fn log_p1(&self) -> &[f64] {
        &self.log_p1
    }

    pub(crate) fn log_prior_ham(&self) -> f64 {
        self.log_prior_ham
    }

    pub(crate) fn log_prior_spam(&self) -> f64 {
        self.log_prior_spam
    }
}

impl TryFrom<ArtifactFile> for ModelArtifact {
    type Error = ClassifierError;

    fn try_from(file: ArtifactFile) -> Result<Self> {
        let vocab_len = file.vocabulary.len();

        if file.p0_vector.len() != vocab_len || file.p1_vector.len() != vocab_len {
            return Err(ClassifierError::CorruptArtifact(format!(
                "vector lengths do not match vocabulary: vocabulary={}, p0_vector={}, p1_vector={}",
                vocab_len,
                file.p0_vector.len(),
                file.p1_vector.len()
            )));
        }

        if !(file.p_spam > 0.0 && file.p_spam < 1.0) {
            return Err(ClassifierError::CorruptArtifact(format!(
                "p_spam must be in (0, 1), got {}",
                file.p_spam
            )));
        }

        check_probabilities("p0_vector", &file.p0_vector)?;
        check_probabilities("p1_vector", &file.p1_vector)?;
        check_index(&file.vocabulary, &file.word_to_idx)?;

        let log_p0 = file.p0_vector.iter().map(|p| p.ln()).collect();
        let log_p1 = file.p1_vector.iter().map(|p| p.ln()).collect();

        Ok(Self {
            log_prior_ham: (1.0 - file.p_spam).ln(),
            log_prior_spam: file.p_spam.ln(),
            log_p0,
            log_p1,
            vocabulary: file.vocabulary,
            word_to_idx: file.word_to_idx,
            stop_words: file.stop_words,
            p0_vector: file.p0_vector,
            p1_vector: file.p1_vector,
            p_spam: file.p_spam,
        })
    }
}

fn check_probabilities(name: &str, values: &[f64]) -> Result<()> {
    match values.iter().position(|p| !(p.is_finite() && *p > 0.0)) {
        Some(idx) => Err(ClassifierError::CorruptArtifact(format!(
            "{}[{}] must be a positive finite probability, got {}",
            name, idx, values[idx]
        ))),
        None => Ok(()),
    }
}

/// `word_to_idx` must be the exact inverse of `vocabulary`
fn check_index(vocabulary: &[String], word_to_idx: &HashMap<String, usize>) -> Result<()> {
    let mut seen = HashSet::with_capacity(vocabulary.len());
    for word in vocabulary {
        if !seen.insert(word.as_str()) {
            return Err(ClassifierError::CorruptArtifact(format!(
                "duplicate vocabulary entry '{}'",
                word
            )));
        }
    }

    if word_to_idx.len() != vocabulary.len() {
        return Err(ClassifierError::CorruptArtifact(format!(
            "word_to_idx has {} entries for a vocabulary of {}",
            word_to_idx.len(),
            vocabulary.len()
        )));
    }

    for (word, &idx) in word_to_idx {
        if vocabulary.get(idx) != Some(word) {
            return Err(ClassifierError::CorruptArtifact(format!(
                "word_to_idx maps '{}' to {}, which is not its vocabulary position",
                word, idx
            )));
        }
    }

    Ok(())
}
