//! Server startup with environment configuration loading

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;

/// Load configuration from the environment and run the gateway.
pub async fn run_server() -> Result<()> {
    if dotenvy::dotenv().is_ok() {
        debug!("loaded environment from .env");
    }

    let config = Config::from_env();
    info!("Starting CNB gateway");
    if config.repo.is_none() {
        warn!("CNB_REPO is not set; proxy endpoints will answer with configuration errors");
    }
    if config.embeddings_path.is_none() {
        info!("CNB_EMBEDDINGS_PATH is not set; embeddings endpoint is disabled");
    }

    info!("API endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /v1/models - Model list");
    info!("   POST /v1/chat/completions - Chat completions");
    info!("   POST /v1/embeddings - Text embeddings");

    let server = HttpServer::new(&config)?;
    server.start().await
}
