//! Response normalization for embeddings payloads
//!
//! The CNB backend returns embeddings in several shapes. Two independent
//! repair rules rewrite them into the canonical OpenAI form; both are pure
//! `Value -> Value` transformations, so a payload reused across batch merge
//! steps can never be observed half-repaired through an alias.

use serde_json::{json, Value};
use tracing::{debug, warn};

/// Apply both repair rules to one upstream embeddings payload.
pub fn normalize_embeddings_body(body: Value, requested_model: &str) -> Value {
    let body = repair_flat_embeddings(body, requested_model);
    repair_stringified_vectors(body)
}

/// Rule 1: flat-vector repair.
///
/// Some backends return `{"embeddings": ...}` with no `data` field. The
/// `embeddings` value is classified like request input: a numeric first
/// element means the whole field is one vector, an array first element means
/// one vector per position. The field is deleted after conversion and the
/// mandatory envelope fields (`object`, `model`, `usage`) are backfilled
/// when absent.
fn repair_flat_embeddings(mut body: Value, requested_model: &str) -> Value {
    let Some(obj) = body.as_object_mut() else {
        return body;
    };
    if obj.contains_key("data") {
        return body;
    }
    let Some(embeddings) = obj.get("embeddings").and_then(Value::as_array).cloned() else {
        return body;
    };

    let items: Vec<Value> = match embeddings.first() {
        Some(Value::Number(_)) => vec![embedding_item(Value::Array(embeddings), 0)],
        Some(Value::Array(_)) => embeddings
            .into_iter()
            .enumerate()
            .map(|(index, vector)| embedding_item(vector, index))
            .collect(),
        None => Vec::new(),
        // Unrecognized element kind: leave the payload alone.
        Some(_) => return body,
    };

    debug!(items = items.len(), "compatibility: converted flat embeddings field to data array");

    obj.remove("embeddings");
    obj.insert("data".to_string(), Value::Array(items));
    obj.entry("object").or_insert(json!("list"));
    obj.entry("model").or_insert(json!(requested_model));
    obj.entry("usage")
        .or_insert(json!({"prompt_tokens": 0, "total_tokens": 0}));

    body
}

/// Rule 2: stringified-vector repair.
///
/// Some responses carry `embedding` as the string `"[0.1,0.2,...]"`, which
/// breaks client unmarshalling. Any `data` item whose embedding is a
/// bracketed string is parsed and replaced in the returned value. A parse
/// failure leaves that item's original string untouched and never fails the
/// response.
fn repair_stringified_vectors(mut body: Value) -> Value {
    let Some(items) = body.get_mut("data").and_then(Value::as_array_mut) else {
        return body;
    };

    for item in items.iter_mut() {
        let Some(text) = item.get("embedding").and_then(Value::as_str) else {
            continue;
        };
        let trimmed = text.trim();
        if !(trimmed.starts_with('[') && trimmed.ends_with(']')) {
            continue;
        }
        match serde_json::from_str::<Vec<f64>>(trimmed) {
            Ok(vector) => {
                debug!("compatibility: parsed stringified embedding into numeric array");
                item["embedding"] = json!(vector);
            }
            Err(err) => {
                warn!(error = %err, "compatibility: failed to parse stringified embedding, leaving value as-is");
            }
        }
    }

    body
}

fn embedding_item(embedding: Value, index: usize) -> Value {
    json!({
        "object": "embedding",
        "embedding": embedding,
        "index": index,
    })
}
