//! Shared application state
//!
//! One `AppState` is built at startup and cloned into every worker. The
//! configuration is read-only and the HTTP client is internally pooled, so
//! requests share nothing mutable.

use crate::config::Config;
use crate::core::providers::CnbClient;
use crate::utils::error::Result;

/// State handed to every route handler via `web::Data`
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub client: CnbClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            client: CnbClient::new()?,
            config,
        })
    }
}
