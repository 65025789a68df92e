//! CNB Gateway - OpenAI-compatible proxy for the CNB LLM API
//!
//! Re-exposes the CNB chat/embeddings/models endpoints under the OpenAI
//! wire contract so stock OpenAI clients can point at it unmodified.

use std::process::ExitCode;

use cnb_gateway::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging system (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    match server::builder::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
