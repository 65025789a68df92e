//! Embedding wire types
//!
//! The client-facing shapes follow the OpenAI embeddings contract; the
//! upstream request carries both `input` and `text` because different CNB
//! backends read different field names.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::error::{GatewayError, Result};

/// Classified embeddings input.
///
/// The OpenAI contract allows a single string, a pre-tokenized numeric
/// sequence, or a batch of strings, with no explicit tag. Classification
/// happens exactly once at the boundary (here) by inspecting the first
/// element's kind; downstream code dispatches on the variant and never
/// re-sniffs the JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingInput {
    /// One text to embed
    Text(String),
    /// One pre-tokenized input (or any non-textual array), relayed verbatim
    /// as a single upstream call
    Tokens(Vec<Value>),
    /// A batch of texts requiring fan-out, one upstream call per element
    TextBatch(Vec<String>),
}

impl EmbeddingInput {
    /// Classify a raw `input` value.
    ///
    /// A sequence is a batch iff it is non-empty and its first element is a
    /// string; every other sequence is treated as one pre-tokenized input
    /// and sent upstream in a single call. A batch mixing strings with
    /// non-strings is rejected rather than silently truncated, since the
    /// response must contain exactly one item per input.
    pub fn classify(value: &Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::Array(items) => match items.first() {
                Some(Value::String(_)) => {
                    let texts = items
                        .iter()
                        .map(|item| {
                            item.as_str().map(str::to_owned).ok_or_else(|| {
                                GatewayError::InvalidRequest(
                                    "Invalid input: batch arrays must contain only strings"
                                        .to_string(),
                                )
                            })
                        })
                        .collect::<Result<Vec<_>>>()?;
                    Ok(Self::TextBatch(texts))
                }
                _ => Ok(Self::Tokens(items.clone())),
            },
            _ => Err(GatewayError::InvalidRequest(
                "Invalid input: expected a string or an array".to_string(),
            )),
        }
    }

    /// Number of client-visible result items this input must produce
    pub fn len(&self) -> usize {
        match self {
            Self::Text(_) | Self::Tokens(_) => 1,
            Self::TextBatch(texts) => texts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Body of an outbound embeddings call. `text` mirrors `input` for upstream
/// compatibility - both field names are always sent.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamEmbeddingRequest {
    pub model: String,
    pub input: Value,
    pub text: Value,
}

impl UpstreamEmbeddingRequest {
    pub fn new(model: &str, input: Value) -> Self {
        Self {
            model: model.to_string(),
            text: input.clone(),
            input,
        }
    }
}

fn default_item_object() -> String {
    "embedding".to_string()
}

/// One embedding in a response.
///
/// `embedding` stays a raw `Value`: the normalizer repairs string-encoded
/// vectors where it can, but an unparseable string passes through untouched
/// rather than failing the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingItem {
    #[serde(default = "default_item_object")]
    pub object: String,
    #[serde(default)]
    pub embedding: Value,
    /// Position in the original input ordering, assigned by the coordinator.
    /// The upstream value is meaningless (always 0 per sub-call).
    #[serde(default)]
    pub index: u32,
}

/// Token accounting, summed across fan-out sub-calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Canonical client-facing embeddings response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsResponse {
    pub object: String,
    pub data: Vec<EmbeddingItem>,
    pub model: String,
    pub usage: EmbeddingUsage,
}

/// Lenient view of a normalized upstream payload, used when merging fan-out
/// sub-responses. Every field is optional upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamEmbeddingsBody {
    #[serde(default)]
    pub data: Vec<EmbeddingItem>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub usage: Option<EmbeddingUsage>,
}
