//! Configuration for spam-api

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{ClassifierError, Result};

/// Environment variable read by the CLI for `server.listen_addr`
pub const ENV_LISTEN_ADDR: &str = "SPAM_API_LISTEN_ADDR";
/// Environment variable read by the CLI for `model.path`
pub const ENV_MODEL_PATH: &str = "SPAM_API_MODEL_PATH";

/// Main service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Model configuration
    #[serde(default)]
    pub model: ModelConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:8000")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Largest accepted request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Model configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Path to the trained model artifact (.json or .toml)
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/spam_classifier_model.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClassifierError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ClassifierError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Create a default development configuration
    pub fn development() -> Self {
        Self {
            server: ServerConfig::default(),
            model: ModelConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Override listen address and model path when given
    pub fn apply_overrides(&mut self, listen_addr: Option<String>, model_path: Option<PathBuf>) {
        if let Some(addr) = listen_addr {
            self.server.listen_addr = addr;
        }
        if let Some(path) = model_path {
            self.model.path = path;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server.listen_addr.parse::<SocketAddr>().map_err(|e| {
            ClassifierError::Config(format!(
                "Invalid listen address '{}': {}",
                self.server.listen_addr, e
            ))
        })?;

        if self.server.max_body_bytes == 0 {
            return Err(ClassifierError::Config(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ClassifierError::Config(format!(
                "Unknown logging format '{}' (expected \"pretty\" or \"json\")",
                other
            ))),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::development()
    }
}
