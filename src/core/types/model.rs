//! Model listing wire types

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MODEL_OWNER;

/// One model entry in a listing.
///
/// Fallback descriptors are synthesized fresh on every request: `created` is
/// always "now" and must not be treated as a stable identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub owned_by: String,
}

impl ModelDescriptor {
    pub fn synthesized(id: &str) -> Self {
        Self {
            id: id.to_string(),
            object: "model".to_string(),
            created: Utc::now().timestamp(),
            owned_by: DEFAULT_MODEL_OWNER.to_string(),
        }
    }
}

/// OpenAI-shaped model listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelListResponse {
    pub object: String,
    pub data: Vec<ModelDescriptor>,
}

impl ModelListResponse {
    /// Build a local listing from configured ids, used whenever the upstream
    /// listing is unusable.
    pub fn fallback(ids: &[String]) -> Self {
        Self {
            object: "list".to_string(),
            data: ids.iter().map(|id| ModelDescriptor::synthesized(id)).collect(),
        }
    }
}
