//! Test harness: boots the real HTTP server on an ephemeral port and
//! talks to it over TCP with reqwest.

use serde_json::Value;
use spam_api::classifier::ArtifactFile;
use spam_api::config::ServerConfig;
use spam_api::{ApiServer, ClassifierEngine};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::time::sleep;
use tracing::error;

/// Demonstration model shipped with the repository
pub fn demo_model_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("models")
        .join("spam_classifier_model.json")
}

/// A running server plus the files it was started from
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    _model_dir: TempDir,
}

impl TestServer {
    /// Start a server that loads the model at `path` (which may not exist)
    pub async fn start(path: &Path) -> Result<Self, String> {
        let model_dir = tempfile::tempdir().map_err(|e| format!("tempdir: {}", e))?;
        Self::spawn(path, model_dir).await
    }

    /// Write `artifact` as JSON and start a server on it
    pub async fn with_artifact(artifact: &ArtifactFile) -> Result<Self, String> {
        let json = serde_json::to_string(artifact).map_err(|e| format!("encode: {}", e))?;
        Self::with_model_file("model.json", &json).await
    }

    /// Write raw model contents under `file_name` and start a server on it
    pub async fn with_model_file(file_name: &str, contents: &str) -> Result<Self, String> {
        let model_dir = tempfile::tempdir().map_err(|e| format!("tempdir: {}", e))?;
        let path = model_dir.path().join(file_name);
        std::fs::write(&path, contents).map_err(|e| format!("write model: {}", e))?;
        Self::spawn(&path, model_dir).await
    }

    async fn spawn(path: &Path, model_dir: TempDir) -> Result<Self, String> {
        let engine = ClassifierEngine::load_or_unloaded(path);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| format!("bind: {}", e))?;
        let addr = listener.local_addr().map_err(|e| format!("local addr: {}", e))?;

        let server = ApiServer::new(engine, ServerConfig::default());
        tokio::spawn(async move {
            if let Err(e) = server.serve(listener).await {
                error!("Test server error: {}", e);
            }
        });

        let test_server = Self {
            base_url: format!("http://{}", addr),
            client: reqwest::Client::new(),
            _model_dir: model_dir,
        };
        test_server.wait_until_ready(5).await?;
        Ok(test_server)
    }

    /// Wait for the health endpoint to answer
    pub async fn wait_until_ready(&self, timeout_secs: u64) -> Result<(), String> {
        let url = format!("{}/health", self.base_url);
        let start = Instant::now();

        loop {
            if start.elapsed().as_secs() > timeout_secs {
                return Err(format!("Timeout waiting for service: {}", url));
            }

            match self.client.get(&url).send().await {
                Ok(_) => return Ok(()),
                Err(_) => sleep(Duration::from_millis(50)).await,
            }
        }
    }

    /// GET a path and decode the JSON body
    pub async fn get(&self, path: &str) -> Result<(u16, Value), String> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| format!("GET {}: {}", path, e))?;
        decode(response).await
    }

    /// POST a classification request
    pub async fn predict(&self, message: &str) -> Result<(u16, Value), String> {
        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .map_err(|e| format!("POST /predict: {}", e))?;
        decode(response).await
    }
}

async fn decode(response: reqwest::Response) -> Result<(u16, Value), String> {
    let status = response.status().as_u16();
    let body = response
        .json::<Value>()
        .await
        .map_err(|e| format!("Invalid JSON: {}", e))?;
    Ok((status, body))
}
