//! spam-api: Spam Email Detection Server
//!
//! Loads the trained Naive Bayes model once and serves classification
//! requests over HTTP.

use clap::Parser;
use spam_api::config::{ENV_LISTEN_ADDR, ENV_MODEL_PATH};
use spam_api::{ApiServer, ClassifierEngine, ServiceConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spam-api")]
#[command(about = "Spam/ham classification API", version, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model artifact path (overrides config)
    #[arg(short, long, env = ENV_MODEL_PATH)]
    model: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long, env = ENV_LISTEN_ADDR)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => ServiceConfig::from_file(path)?,
        None => ServiceConfig::development(),
    };
    config.apply_overrides(cli.listen, cli.model);
    config.validate()?;

    init_logging(&config);

    info!("Starting spam-api v{}", env!("CARGO_PKG_VERSION"));
    match cli.config {
        Some(ref path) => info!("Configuration loaded from {}", path.display()),
        None => info!("No config file specified, using development defaults"),
    }
    info!("  Listening on: {}", config.server.listen_addr);
    info!("  Model path: {}", config.model.path.display());

    // A failed load leaves the engine unloaded; the server still starts
    let engine = ClassifierEngine::load_or_unloaded(&config.model.path);

    let server = ApiServer::new(engine, config.server.clone());
    server.run().await?;

    Ok(())
}

fn init_logging(config: &ServiceConfig) {
    let level = &config.logging.level;
    let default_filter = format!("spam_api={},tower_http={}", level, level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
