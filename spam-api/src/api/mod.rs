//! REST API for spam classification

pub mod handlers;
pub mod server;

pub use handlers::{ApiError, AppState, HealthResponse, PredictRequest, PredictResponse};
pub use server::ApiServer;
