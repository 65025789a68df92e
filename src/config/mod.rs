//! Configuration management for the gateway
//!
//! All configuration is environment-backed and read once at startup. The
//! `Config` value is read-only per request; handlers never mutate it.
//!
//! Variables:
//!
//! - `CNB_REPO` - mandatory repo identifier, `owner/project/repo`
//! - `CNB_AI_PATH` - optional path override shared by chat and models, each
//!   capability keeping its own default when unset
//! - `CNB_EMBEDDINGS_PATH` - mandatory for embeddings; unset disables the
//!   feature (501)
//! - `CNB_CUSTOM_MODELS` - optional comma-separated model id list used for
//!   fallback synthesis
//! - `CNB_API_BASE` - upstream base URL, default `https://api.cnb.cool`
//! - `GATEWAY_HOST` / `GATEWAY_PORT` - bind address, default `0.0.0.0:8080`

use std::env;

use crate::utils::error::{GatewayError, Result};

/// Upstream base URL
pub const DEFAULT_API_BASE: &str = "https://api.cnb.cool";
/// Default suffix for chat completions
pub const DEFAULT_CHAT_PATH: &str = "/-/ai/chat/completions";
/// Default suffix for model listing
pub const DEFAULT_MODELS_PATH: &str = "/-/ai/models";
/// Model id used when no custom list is configured
pub const DEFAULT_MODEL_ID: &str = "hunyuan-2.0-instruct";
/// `owned_by` value for synthesized model descriptors
pub const DEFAULT_MODEL_OWNER: &str = "cnb";

/// One of the proxied upstream capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Chat,
    Embeddings,
    Models,
}

/// HTTP server bind settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Repo identifier, `owner/project/repo`. Mandatory for every capability.
    pub repo: Option<String>,
    /// Path override shared by chat and models
    pub ai_path: Option<String>,
    /// Embeddings path. No default: absence means the feature is disabled.
    pub embeddings_path: Option<String>,
    /// Comma-separated model ids for fallback synthesis
    pub custom_models: Option<String>,
    /// Upstream base URL
    pub api_base: String,
    /// Bind settings
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: None,
            ai_path: None,
            embeddings_path: None,
            custom_models: None,
            api_base: DEFAULT_API_BASE.to_string(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Set-but-empty values are treated like unset ones so that an explicit
    /// empty override never shadows the built-in defaults.
    pub fn from_env() -> Self {
        let non_empty = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());

        let server = ServerConfig {
            host: non_empty("GATEWAY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: non_empty("GATEWAY_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        };

        Self {
            repo: non_empty("CNB_REPO"),
            ai_path: non_empty("CNB_AI_PATH"),
            embeddings_path: non_empty("CNB_EMBEDDINGS_PATH"),
            custom_models: env::var("CNB_CUSTOM_MODELS").ok(),
            api_base: non_empty("CNB_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            server,
        }
    }

    /// Resolve the fully-qualified upstream URL for a capability.
    ///
    /// The repo identifier is mandatory everywhere. Embeddings additionally
    /// requires its own path - its absence is a distinct "feature not
    /// enabled" condition rather than a generic config error. The URL is not
    /// validated for reachability.
    pub fn upstream_url(&self, capability: Capability) -> Result<String> {
        let repo = self.repo.as_deref().ok_or_else(|| {
            GatewayError::Config(
                "Server configuration error: CNB_REPO environment variable is not set. \
                 Please contact the administrator."
                    .to_string(),
            )
        })?;

        let path = match capability {
            Capability::Chat => self
                .ai_path
                .clone()
                .unwrap_or_else(|| DEFAULT_CHAT_PATH.to_string()),
            Capability::Models => self
                .ai_path
                .clone()
                .unwrap_or_else(|| DEFAULT_MODELS_PATH.to_string()),
            Capability::Embeddings => self.embeddings_path.clone().ok_or_else(|| {
                GatewayError::FeatureNotEnabled(
                    "Embeddings feature is not enabled. CNB_EMBEDDINGS_PATH environment \
                     variable is required."
                        .to_string(),
                )
            })?,
        };

        // Repo must not carry leading/trailing slashes, the path must.
        let base = self.api_base.trim_end_matches('/');
        let repo = repo.trim_matches('/');
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };

        Ok(format!("{}/{}{}", base, repo, path))
    }

    /// Model ids used when synthesizing a fallback model listing.
    ///
    /// An explicitly-set-but-empty list behaves like an unset one: the single
    /// built-in default id is returned, never an empty listing.
    pub fn fallback_model_ids(&self) -> Vec<String> {
        let ids: Vec<String> = self
            .custom_models
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();

        if ids.is_empty() {
            vec![DEFAULT_MODEL_ID.to_string()]
        } else {
            ids
        }
    }
}
