//! OpenAI-compatible API routes

pub mod chat;
pub mod embeddings;
pub mod models;

use actix_web::web;

/// Register the `/v1` API surface
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .route("/chat/completions", web::post().to(chat::chat_completions))
            .route("/embeddings", web::post().to(embeddings::embeddings))
            .route("/models", web::get().to(models::list_models)),
    );
}
