//! Wire types shared across the gateway

pub mod embedding;
pub mod model;

pub use embedding::{
    EmbeddingInput, EmbeddingItem, EmbeddingUsage, EmbeddingsResponse, UpstreamEmbeddingRequest,
    UpstreamEmbeddingsBody,
};
pub use model::{ModelDescriptor, ModelListResponse};
