//! HTTP route modules

pub mod ai;
pub mod health;

/// Error-to-response helpers shared by the handlers
pub mod errors {
    use actix_web::HttpResponse;

    use crate::utils::error::GatewayError;

    /// Render a gateway error as its OpenAI-style envelope with the mapped
    /// HTTP status.
    pub fn error_response(error: &GatewayError) -> HttpResponse {
        HttpResponse::build(error.status_code()).json(error.to_envelope())
    }
}
