//! Bearer token extraction
//!
//! The gateway does not validate credentials; it only lifts the token out of
//! the `Authorization` header and passes it through to the upstream.

use actix_web::http::header;
use actix_web::HttpRequest;
use tracing::debug;

/// Extract the upstream credential from a raw `Authorization` header value.
///
/// Strips a leading `"Bearer "` scheme marker if present, then a leading
/// `"sk-"` compatibility prefix (for clients that insist on OpenAI-style key
/// formatting). Returns the remainder verbatim.
///
/// `None` means the header was absent. An empty remainder is `Some("")` and
/// is deliberately NOT folded into `None`: only a missing header reaches the
/// 401 path, an empty credential is sent upstream as-is.
pub fn extract_token(header_value: Option<&str>) -> Option<String> {
    let mut token = header_value?;
    if let Some(rest) = token.strip_prefix("Bearer ") {
        token = rest;
    }
    if let Some(rest) = token.strip_prefix("sk-") {
        debug!("compatibility: removed sk- prefix from token");
        token = rest;
    }
    Some(token.to_owned())
}

/// Pull the token out of an inbound request.
pub fn token_from_request(req: &HttpRequest) -> Option<String> {
    let raw = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    extract_token(raw)
}
