//! Classifier engine
//!
//! Owns the loaded model (or the lack of one) and runs the
//! normalize -> vectorize -> classify pipeline for each request.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use super::artifact::ModelArtifact;
use super::scorer;
use super::text::{self, Tokenizer};
use super::types::{Classification, FeatureVector, ModelInfo, Prediction};
use crate::error::{ClassifierError, Result};

/// A model that passed validation, ready for scoring
#[derive(Debug)]
pub struct LoadedModel {
    artifact: ModelArtifact,
    tokenizer: Tokenizer,
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl LoadedModel {
    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }
}

/// Engine state
#[derive(Debug)]
pub enum ModelState {
    /// No model; every scoring operation fails with `ModelNotLoaded`
    Unloaded,
    /// Model loaded and immutable for the life of the engine
    Loaded(LoadedModel),
}

/// Spam/ham classifier over a fixed Naive Bayes model
#[derive(Debug)]
pub struct ClassifierEngine {
    state: ModelState,
}

impl ClassifierEngine {
    /// Engine with no model
    pub fn unloaded() -> Self {
        Self {
            state: ModelState::Unloaded,
        }
    }

    /// Load a model artifact from disk
    pub fn load(path: &Path) -> Result<Self> {
        let artifact = ModelArtifact::load(path)?;
        let mut engine = Self::from_artifact(artifact)?;
        if let ModelState::Loaded(ref mut model) = engine.state {
            model.source = Some(path.to_path_buf());
        }
        Ok(engine)
    }

    /// Wrap an already validated artifact
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        Ok(Self {
            state: ModelState::Loaded(LoadedModel {
                artifact,
                tokenizer: Tokenizer::new()?,
                source: None,
                loaded_at: Utc::now(),
            }),
        })
    }

    /// Startup load: a failure is logged and leaves the engine unloaded
    /// so the service can still report its degraded state.
    pub fn load_or_unloaded(path: &Path) -> Self {
        match Self::load(path) {
            Ok(engine) => {
                if let Ok(info) = engine.model_info() {
                    info!(
                        "Model loaded from {} ({} words, {} stop words, p_spam={})",
                        path.display(),
                        info.vocabulary_size,
                        info.stopwords_count,
                        info.prior_spam_probability
                    );
                }
                engine
            }
            Err(e) => {
                error!("Error loading model: {}", e);
                error!("Serving without a model; /predict will return 503");
                Self::unloaded()
            }
        }
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ModelState::Loaded(_))
    }

    fn model(&self) -> Result<&LoadedModel> {
        match &self.state {
            ModelState::Loaded(model) => Ok(model),
            ModelState::Unloaded => Err(ClassifierError::ModelNotLoaded),
        }
    }

    /// Clean text into the tokens the model was trained on
    pub fn normalize(&self, text: &str) -> Result<Vec<String>> {
        let model = self.model()?;
        Ok(model.tokenizer.normalize(text, &model.artifact))
    }

    /// Count vocabulary hits in a token sequence
    pub fn vectorize<S: AsRef<str>>(&self, tokens: &[S]) -> Result<FeatureVector> {
        let model = self.model()?;
        Ok(text::vectorize(tokens, &model.artifact))
    }

    /// Score a feature vector
    pub fn classify(&self, vector: &FeatureVector) -> Result<Classification> {
        let model = self.model()?;
        scorer::classify(vector, &model.artifact)
    }

    /// Run the full pipeline on a message
    pub fn predict(&self, message: &str) -> Result<Prediction> {
        let model = self.model()?;

        let cleaned_words = model.tokenizer.normalize(message, &model.artifact);
        let vector = text::vectorize(&cleaned_words, &model.artifact);
        let result = scorer::classify(&vector, &model.artifact)?;

        debug!(
            "Classified {} words ({} in vocabulary) as {} (spam={:.4}, ham={:.4})",
            cleaned_words.len(),
            vector.total(),
            result.verdict.label(),
            result.score_spam,
            result.score_ham
        );

        Ok(Prediction {
            verdict: result.verdict,
            confidence: result.confidence,
            word_count: cleaned_words.len(),
            cleaned_words,
        })
    }

    /// Summary of the loaded model
    pub fn model_info(&self) -> Result<ModelInfo> {
        let model = self.model()?;
        let artifact = &model.artifact;

        Ok(ModelInfo {
            vocabulary_size: artifact.vocabulary().len(),
            prior_spam_probability: artifact.p_spam(),
            features: artifact.p0_vector().len(),
            stopwords_count: artifact.stop_words().len(),
            model_path: model.source.clone(),
            loaded_at: model.loaded_at,
        })
    }
}

impl Default for ClassifierEngine {
    fn default() -> Self {
        Self::unloaded()
    }
}
