//! Naive Bayes classifier module
//!
//! Loads a pre-trained spam/ham model and scores messages against it.

pub mod artifact;
pub mod engine;
pub mod scorer;
pub mod text;
pub mod types;

pub use artifact::{ArtifactFile, ArtifactFormat, ModelArtifact};
pub use engine::{ClassifierEngine, LoadedModel, ModelState};
pub use text::{vectorize, Tokenizer};
pub use types::*;
