//! Outbound HTTP calls to the CNB backend

use reqwest::header;
use serde_json::Value;
use tracing::{error, info};

use super::error::translate_error_response;
use crate::core::types::UpstreamEmbeddingRequest;
use crate::utils::error::{GatewayError, Result};

/// Thin wrapper over a shared `reqwest::Client`.
///
/// Redirect following is disabled: the upstream answers unauthenticated
/// requests with a 3xx to its login page, and following it would turn an
/// auth failure into a confusing 200 HTML response. The error translator
/// needs to see the redirect itself.
#[derive(Debug, Clone)]
pub struct CnbClient {
    http: reqwest::Client,
}

impl CnbClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }

    /// POST a chat completions body upstream verbatim.
    ///
    /// Returns the raw response on 2xx so the caller can decide between
    /// buffering JSON and relaying the event stream.
    pub async fn post_chat(&self, url: &str, token: &str, body: &Value) -> Result<reqwest::Response> {
        let response = self
            .http
            .post(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(translate_error_response(response).await);
        }
        Ok(response)
    }

    /// POST one embeddings request upstream and buffer the JSON reply.
    pub async fn post_embedding(
        &self,
        url: &str,
        token: &str,
        request: &UpstreamEmbeddingRequest,
    ) -> Result<Value> {
        let response = self
            .http
            .post(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(translate_error_response(response).await);
        }

        response.json::<Value>().await.map_err(|e| {
            GatewayError::Internal(format!("Upstream returned malformed JSON: {}", e))
        })
    }

    /// GET the upstream model listing.
    ///
    /// `None` signals "synthesize a fallback": model listing never surfaces
    /// an upstream error to the caller, so every failure mode - transport
    /// error, non-2xx, non-JSON content type, malformed body - degrades to
    /// `None` instead of `Err`.
    pub async fn get_models(&self, url: &str, token: &str) -> Option<Value> {
        let response = match self
            .http
            .get(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "model listing request failed, falling back");
                return None;
            }
        };

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);

        if !response.status().is_success() || !is_json {
            info!(
                status = response.status().as_u16(),
                json = is_json,
                "upstream model listing unusable, falling back"
            );
            return None;
        }

        match response.json::<Value>().await {
            Ok(data) => Some(data),
            Err(err) => {
                error!(error = %err, "model listing body unparseable, falling back");
                None
            }
        }
    }
}
