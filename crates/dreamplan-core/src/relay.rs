//! The enrichment relay pipeline: credential check, prompt construction,
//! one outbound model call, JSON extraction, parse.
//!
//! The relay is stateless and performs no shape validation on the parsed
//! reply -- a malformed-but-parseable object is returned as-is and failure
//! is deferred to the rendering layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::answers::PlanData;
use crate::anthropic::AnthropicClient;
use crate::extract::extract_json_object;
use crate::prompt::build_prompt;

/// Request body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub plan_data: PlanData,
    /// Caller-supplied credential, forwarded to the model API. Optional so
    /// its absence is a relay-level 400 rather than a deserialisation error.
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
}

/// Success body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: Value,
}

/// Errors the relay can return. Display strings double as the HTTP error
/// bodies, so their wording is part of the contract.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The caller supplied no credential; no outbound call is made.
    #[error("Anthropic API key is required")]
    MissingApiKey,

    /// The external service answered with a non-success status. The status
    /// code and body are forwarded to the caller.
    #[error("Claude API error: {body}")]
    Upstream { status: u16, body: String },

    /// The model reply contained no brace-delimited JSON block.
    #[error("Could not parse AI response")]
    UnparseableReply,

    /// Anything else: transport failures, malformed upstream payloads,
    /// JSON blocks that fail to parse.
    #[error("{0}")]
    Internal(String),
}

/// Run one analysis: exactly one outbound call, no retries.
///
/// An absent or empty API key fails before any network traffic.
pub async fn analyze(
    client: &AnthropicClient,
    plan: &PlanData,
    api_key: Option<&str>,
) -> Result<Value, RelayError> {
    let api_key = match api_key {
        Some(key) if !key.trim().is_empty() => key,
        _ => return Err(RelayError::MissingApiKey),
    };

    let prompt = build_prompt(plan);
    debug!(prompt_len = prompt.len(), "calling model for plan analysis");

    let reply = client.complete(api_key, &prompt).await?;

    let block = extract_json_object(&reply).ok_or(RelayError::UnparseableReply)?;
    let analysis: Value =
        serde_json::from_str(block).map_err(|e| RelayError::Internal(e.to_string()))?;

    Ok(analysis)
}
