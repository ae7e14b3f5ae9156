//! API request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

use crate::classifier::{ClassifierEngine, ModelInfo};
use crate::error::ClassifierError;

/// Shared application state
pub struct AppState {
    pub engine: ClassifierEngine,
}

/// Classification request body
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub message: String,
}

/// Classification response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub message: String,
    pub prediction: String,
    pub confidence: f64,
    pub is_spam: bool,
    pub cleaned_words: Vec<String>,
    pub word_count: usize,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub detail: String,
}

impl ApiError {
    pub fn new(msg: &str) -> Self {
        Self {
            detail: msg.to_string(),
        }
    }
}

impl IntoResponse for ClassifierError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ClassifierError::ModelNotLoaded => {
                (StatusCode::SERVICE_UNAVAILABLE, "Model not loaded".to_string())
            }
            ClassifierError::InvalidInput(reason) => {
                (StatusCode::UNPROCESSABLE_ENTITY, reason.clone())
            }
            ClassifierError::Internal(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Prediction error: {}", reason),
            ),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            error!("Request failed: {}", self);
        }

        (status, Json(ApiError::new(&detail))).into_response()
    }
}

/// GET / - Service description
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Spam Email Detection API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/predict": "POST - Classify an email message",
            "/health": "GET - Check API health status",
            "/model-info": "GET - Get model information"
        }
    }))
}

/// GET /health - Report whether a model is loaded
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let model_loaded = state.engine.is_loaded();
    Json(HealthResponse {
        status: if model_loaded { "healthy" } else { "unhealthy" }.to_string(),
        model_loaded,
    })
}

/// GET /model-info - Summary of the loaded model
pub async fn model_info(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModelInfo>, ClassifierError> {
    Ok(Json(state.engine.model_info()?))
}

/// POST /predict - Classify a message as spam or ham
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ClassifierError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected predict request: {}", rejection.body_text());
        ClassifierError::InvalidInput(rejection.body_text())
    })?;

    let prediction = state.engine.predict(&request.message).map_err(|e| match e {
        ClassifierError::ModelNotLoaded | ClassifierError::Internal(_) => e,
        other => ClassifierError::Internal(other.to_string()),
    })?;

    Ok(Json(PredictResponse {
        message: request.message,
        prediction: prediction.verdict.label().to_string(),
        confidence: prediction.confidence,
        is_spam: prediction.is_spam(),
        word_count: prediction.word_count,
        cleaned_words: prediction.cleaned_words,
    }))
}
