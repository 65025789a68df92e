//! Embeddings batch fan-out coordinator
//!
//! The upstream embeds one input per call, so a batch request from the
//! client is split into one concurrent upstream call per element and the
//! results are merged back into a single OpenAI-shaped response. The
//! upstream reports `index: 0` for every sub-call; client-visible indices
//! are assigned here from the original input ordering.

use futures::future;
use serde_json::{json, Value};
use tracing::debug;

use super::client::CnbClient;
use super::normalize::normalize_embeddings_body;
use crate::core::types::{
    EmbeddingInput, EmbeddingUsage, EmbeddingsResponse, UpstreamEmbeddingRequest,
    UpstreamEmbeddingsBody,
};
use crate::utils::error::{GatewayError, Result};

/// Handle one inbound embeddings body end to end.
///
/// Classification happens once, here; single inputs are relayed as one call
/// and returned normalized but otherwise unmodified (unknown upstream fields
/// survive), batches go through the fan-out merge.
pub async fn handle_embeddings(
    client: &CnbClient,
    url: &str,
    token: &str,
    body: &Value,
) -> Result<Value> {
    let model = body
        .get("model")
        .and_then(Value::as_str)
        .unwrap_or("default")
        .to_string();
    let input = body.get("input").cloned().ok_or_else(|| {
        GatewayError::InvalidRequest("Missing required field: input".to_string())
    })?;

    match EmbeddingInput::classify(&input)? {
        EmbeddingInput::Text(text) => {
            single_call(client, url, token, &model, Value::String(text)).await
        }
        EmbeddingInput::Tokens(tokens) => {
            single_call(client, url, token, &model, Value::Array(tokens)).await
        }
        EmbeddingInput::TextBatch(texts) => {
            let merged = fan_out(client, url, token, &model, texts).await?;
            Ok(serde_json::to_value(merged)?)
        }
    }
}

async fn single_call(
    client: &CnbClient,
    url: &str,
    token: &str,
    model: &str,
    input: Value,
) -> Result<Value> {
    let request = UpstreamEmbeddingRequest::new(model, input);
    let body = client.post_embedding(url, token, &request).await?;
    Ok(normalize_embeddings_body(body, model))
}

/// Issue one upstream call per batch element, concurrently, and merge.
///
/// All sub-calls are allowed to finish (join-all, no transport-level
/// short-circuit); afterwards the results are scanned in original input
/// order, so when several sub-calls fail the error with the lowest index is
/// the one surfaced. Partial success is not a success: any failure fails
/// the whole batch.
async fn fan_out(
    client: &CnbClient,
    url: &str,
    token: &str,
    model: &str,
    texts: Vec<String>,
) -> Result<EmbeddingsResponse> {
    debug!(batch = texts.len(), "fanning out embeddings batch");

    let calls = texts.into_iter().map(|text| {
        let request = UpstreamEmbeddingRequest::new(model, Value::String(text));
        async move { client.post_embedding(url, token, &request).await }
    });
    let results = future::join_all(calls).await;

    let mut bodies = Vec::with_capacity(results.len());
    for result in results {
        bodies.push(normalize_embeddings_body(result?, model));
    }

    merge_batch(bodies, model)
}

/// Merge normalized sub-responses, in original input order.
fn merge_batch(bodies: Vec<Value>, requested_model: &str) -> Result<EmbeddingsResponse> {
    let mut data = Vec::with_capacity(bodies.len());
    let mut usage = EmbeddingUsage::default();
    let mut model: Option<String> = None;

    for (index, body) in bodies.into_iter().enumerate() {
        let sub: UpstreamEmbeddingsBody = serde_json::from_value(body).map_err(|e| {
            GatewayError::Internal(format!("Upstream returned malformed embeddings payload: {}", e))
        })?;

        let mut item = sub.data.into_iter().next().ok_or_else(|| {
            GatewayError::Upstream {
                message: format!("Upstream returned no embedding for batch item {}", index),
                status: 502,
                code: Some(json!(502)),
            }
        })?;
        item.index = index as u32;
        data.push(item);

        if let Some(sub_usage) = sub.usage {
            usage.prompt_tokens += sub_usage.prompt_tokens;
            usage.total_tokens += sub_usage.total_tokens;
        }
        if model.is_none() {
            model = sub.model;
        }
    }

    Ok(EmbeddingsResponse {
        object: "list".to_string(),
        data,
        model: model.unwrap_or_else(|| requested_model.to_string()),
        usage,
    })
}
