//! Error handling for the gateway
//!
//! One error type covers the whole request path. Every failure surfaces to
//! the client exactly once, as an OpenAI-style error envelope; there is no
//! retry anywhere.

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// A mandatory setting is absent (HTTP 500)
    #[error("{0}")]
    Config(String),

    /// The capability is disabled by configuration (HTTP 501)
    #[error("{0}")]
    FeatureNotEnabled(String),

    /// Missing credential (HTTP 401)
    #[error("{0}")]
    Auth(String),

    /// Malformed client request (HTTP 400)
    #[error("{0}")]
    InvalidRequest(String),

    /// Upstream replied non-2xx; status mirrors the upstream when valid
    #[error("{message}")]
    Upstream {
        message: String,
        status: u16,
        /// Upstream-provided code when present, else the HTTP status
        code: Option<Value>,
    },

    /// Transport failures and other uncaught conditions (HTTP 500)
    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    /// Wire-level `error.type` string
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::FeatureNotEnabled(_) => "feature_not_enabled",
            Self::Auth(_) => "authentication_error",
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::Upstream { .. } => "upstream_error",
            Self::Internal(_) => "server_error",
        }
    }

    /// HTTP status for the translated response
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::FeatureNotEnabled(_) => StatusCode::NOT_IMPLEMENTED,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    /// Build the client-facing envelope. Constructed once per failed
    /// operation and never mutated afterwards.
    pub fn to_envelope(&self) -> ErrorEnvelope {
        let message = match self {
            Self::Config(m)
            | Self::FeatureNotEnabled(m)
            | Self::Auth(m)
            | Self::InvalidRequest(m)
            | Self::Internal(m) => m.clone(),
            Self::Upstream { message, .. } => message.clone(),
        };
        let code = match self {
            Self::Upstream { code, .. } => code.clone(),
            _ => None,
        };
        ErrorEnvelope {
            error: ErrorBody {
                message,
                error_type: self.error_type().to_string(),
                param: None,
                code,
            },
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Internal(format!("Internal server error: {}", err))
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("Internal server error: {}", err))
    }
}

/// OpenAI-style error envelope: `{"error": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Body of the error envelope. `param` is always serialized (as `null`),
/// matching what OpenAI clients expect to find.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub param: Option<String>,
    pub code: Option<Value>,
}
