//! Model listing endpoint
//!
//! Once configuration and credentials check out, this endpoint always
//! answers 200 with *some* listing: an unusable upstream reply degrades to
//! a locally synthesized one instead of an error.

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::Value;
use tracing::{error, info};

use crate::config::Capability;
use crate::core::types::ModelListResponse;
use crate::server::routes::errors;
use crate::server::state::AppState;
use crate::utils::auth;
use crate::utils::error::{GatewayError, Result};

/// GET /v1/models
pub async fn list_models(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    info!("model listing request");

    match handle_models(&state, &req).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "model listing failed");
            errors::error_response(&e)
        }
    }
}

async fn handle_models(state: &AppState, req: &HttpRequest) -> Result<HttpResponse> {
    let url = state.config.upstream_url(Capability::Models)?;
    let token = auth::token_from_request(req)
        .ok_or_else(|| GatewayError::Auth("Missing Authorization header.".to_string()))?;

    match state.client.get_models(&url, &token).await {
        Some(data) => {
            let count = data.get("data").and_then(Value::as_array).map(Vec::len);
            info!(count, "relaying upstream model listing");
            Ok(HttpResponse::Ok().json(data))
        }
        None => {
            let ids = state.config.fallback_model_ids();
            info!(models = ids.len(), "synthesizing fallback model listing");
            Ok(HttpResponse::Ok().json(ModelListResponse::fallback(&ids)))
        }
    }
}
