//! Translation of upstream failures into gateway errors
//!
//! The CNB backend does not always fail politely: unauthenticated requests
//! are answered with a silent 3xx redirect to a login page instead of a
//! 401/403. The translator therefore inspects redirects before bodies and
//! annotates login-looking targets with the probable cause.

use serde_json::{json, Value};
use tracing::error;

use crate::utils::error::GatewayError;

/// Consume a non-2xx upstream response and produce the gateway error for it.
pub async fn translate_error_response(response: reqwest::Response) -> GatewayError {
    let status = response.status().as_u16();
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let body = match response.text().await {
        Ok(text) => text,
        Err(err) => {
            error!(error = %err, "failed to read upstream error body");
            String::new()
        }
    };
    if !body.is_empty() {
        error!(status, body = %body, "CNB API error");
    }

    classify_upstream_failure(status, location.as_deref(), &body)
}

/// Classification order:
/// (a) a 3xx gets the redirect target appended, plus a probable-cause hint
///     when the target looks like a login page;
/// (b) a non-empty body overrides the message - JSON `msg` preferred, then
///     `error.message`, else the raw text - and an upstream `code` field is
///     adopted when present;
/// (c) with no body the status-line message (and redirect hint) stands.
/// The HTTP status is mirrored; `code` defaults to it.
pub fn classify_upstream_failure(
    status: u16,
    location: Option<&str>,
    body: &str,
) -> GatewayError {
    let mut message = format!("Upstream returned {}", status);
    let mut code: Option<Value> = None;

    if (300..400).contains(&status) {
        if let Some(location) = location {
            message.push_str(&format!(". Redirect to: {}", location));
            if location.contains("signin") || location.contains("login") {
                message.push_str(" (Probable cause: Invalid Token or CNB_REPO)");
            }
        }
    }

    if !body.is_empty() {
        match serde_json::from_str::<Value>(body) {
            Ok(parsed) => {
                if let Some(msg) = parsed.get("msg").and_then(Value::as_str) {
                    message = msg.to_string();
                } else if let Some(msg) = parsed
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
                {
                    message = msg.to_string();
                } else {
                    message = body.to_string();
                }
                if let Some(upstream_code) = parsed.get("code") {
                    if !upstream_code.is_null() {
                        code = Some(upstream_code.clone());
                    }
                }
            }
            Err(_) => message = body.to_string(),
        }
    }

    GatewayError::Upstream {
        message,
        status,
        code: Some(code.unwrap_or_else(|| json!(status))),
    }
}
