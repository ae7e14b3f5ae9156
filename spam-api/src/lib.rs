//! spam-api: Naive Bayes spam classification service
//!
//! Serves a pre-trained spam/ham model over HTTP. Messages are
//! normalized, counted against the model vocabulary and scored with
//! per-class log-probabilities.
//!
//! # Endpoints
//!
//! - `GET /` - service description
//! - `GET /health` - whether a model is loaded
//! - `GET /model-info` - vocabulary size, prior, feature and stop-word counts
//! - `POST /predict` - classify `{"message": "..."}`
//!
//! If the model cannot be loaded at startup the service still runs;
//! `/health` reports `unhealthy` and scoring endpoints answer 503.
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! listen_addr = "0.0.0.0:8000"
//!
//! [model]
//! path = "models/spam_classifier_model.json"
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;

pub use api::ApiServer;
pub use classifier::ClassifierEngine;
pub use config::ServiceConfig;
pub use error::{ClassifierError, Result};
