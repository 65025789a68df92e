//! Chat completions endpoint
//!
//! Pure passthrough: the client body is forwarded upstream verbatim and the
//! reply comes back either as buffered JSON or, when the client requested
//! streaming, as an opaque byte relay of the upstream event stream.

use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use actix_web::{web, HttpRequest, HttpResponse};
use futures::StreamExt;
use serde_json::Value;
use tracing::{error, info};

use crate::config::Capability;
use crate::server::routes::errors;
use crate::server::state::AppState;
use crate::utils::auth;
use crate::utils::error::{GatewayError, Result};

/// POST /v1/chat/completions
pub async fn chat_completions(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<Value>,
) -> HttpResponse {
    let body = body.into_inner();
    let stream_requested = body.get("stream").and_then(Value::as_bool).unwrap_or(false);
    let model = body.get("model").and_then(Value::as_str).unwrap_or("default");
    let messages = body.get("messages").and_then(Value::as_array).map(Vec::len);
    info!(model, stream = stream_requested, messages, "chat completion request");

    match handle_chat(&state, &req, &body, stream_requested).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "chat completion failed");
            errors::error_response(&e)
        }
    }
}

async fn handle_chat(
    state: &AppState,
    req: &HttpRequest,
    body: &Value,
    stream_requested: bool,
) -> Result<HttpResponse> {
    let url = state.config.upstream_url(Capability::Chat)?;
    let token = auth::token_from_request(req).ok_or_else(|| {
        GatewayError::Auth(
            "Missing Authorization header. Please provide your CNB token as Bearer token."
                .to_string(),
        )
    })?;

    let upstream = state.client.post_chat(&url, &token, body).await?;

    if stream_requested {
        info!("relaying upstream event stream");
        let relay = upstream
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| GatewayError::Internal(e.to_string())));
        Ok(HttpResponse::Ok()
            .insert_header((CONTENT_TYPE, "text/event-stream"))
            .insert_header((CACHE_CONTROL, "no-cache"))
            .insert_header(("Connection", "keep-alive"))
            .streaming(relay))
    } else {
        let data: Value = upstream.json().await.map_err(|e| {
            GatewayError::Internal(format!("Upstream returned malformed JSON: {}", e))
        })?;
        info!(usage = ?data.get("usage"), "chat completion succeeded");
        Ok(HttpResponse::Ok().json(data))
    }
}
