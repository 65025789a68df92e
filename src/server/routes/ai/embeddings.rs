//! Embeddings endpoint
//!
//! Config and credential checks live here; the batch-vs-single decision and
//! the fan-out merge are the coordinator's job.

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::Value;
use tracing::{error, info};

use crate::config::Capability;
use crate::core::providers::cnb::fanout;
use crate::server::routes::errors;
use crate::server::state::AppState;
use crate::utils::auth;
use crate::utils::error::{GatewayError, Result};

/// POST /v1/embeddings
pub async fn embeddings(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<Value>,
) -> HttpResponse {
    let body = body.into_inner();
    let model = body.get("model").and_then(Value::as_str).unwrap_or("default");
    let input_length = match body.get("input") {
        Some(Value::Array(items)) => items.len(),
        _ => 1,
    };
    info!(model, input_length, "embeddings request");

    match handle_embeddings(&state, &req, &body).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "embeddings request failed");
            errors::error_response(&e)
        }
    }
}

async fn handle_embeddings(
    state: &AppState,
    req: &HttpRequest,
    body: &Value,
) -> Result<HttpResponse> {
    let url = state.config.upstream_url(Capability::Embeddings)?;
    let token = auth::token_from_request(req).ok_or_else(|| {
        GatewayError::Auth(
            "Missing Authorization header. Please provide your CNB token as Bearer token."
                .to_string(),
        )
    })?;

    let response = fanout::handle_embeddings(&state.client, &url, &token, body).await?;
    info!(usage = ?response.get("usage"), "embeddings request succeeded");
    Ok(HttpResponse::Ok().json(response))
}
