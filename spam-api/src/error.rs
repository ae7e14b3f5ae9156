//! Error types for spam-api

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Classifier error types
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Model artifact does not exist
    #[error("Model file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Model artifact could not be decoded or violates its invariants
    #[error("Corrupt model artifact: {0}")]
    CorruptArtifact(String),

    /// Scoring requested while no model is loaded
    #[error("Model not loaded")]
    ModelNotLoaded,

    /// Malformed request payload
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected failure while scoring
    #[error("Internal error: {0}")]
    Internal(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
