//! API Server - HTTP server for the classification API

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::any::Any as PanicPayload;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::api::handlers::{self, ApiError, AppState};
use crate::classifier::ClassifierEngine;
use crate::config::ServerConfig;
use crate::error::Result;

/// API Server
pub struct ApiServer {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl ApiServer {
    /// Create a new API server around a (possibly unloaded) engine
    pub fn new(engine: ClassifierEngine, config: ServerConfig) -> Self {
        let state = Arc::new(AppState { engine });
        Self { state, config }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        let routes = Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/model-info", get(handlers::model_info))
            .route("/predict", post(handlers::predict));

        self.layered(routes).with_state(self.state.clone())
    }

    /// Wrap routes in the service middleware stack
    fn layered(&self, routes: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Bind the configured address and serve until shutdown
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.listen_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let router = self.router();

        info!("Starting API server on {}", listener.local_addr()?);
        if self.state.engine.is_loaded() {
            info!("Model: loaded");
        } else {
            info!("Model: not loaded (degraded mode)");
        }

        axum::serve(listener, router).await?;

        Ok(())
    }
}

/// Turn a handler panic into a 500 with a JSON body
fn handle_panic(err: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let reason = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("Handler panicked: {}", reason);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::new(&format!("Internal error: {}", reason))),
    )
        .into_response()
}
