//! Analysis orchestration: picks the remote or heuristic path and turns
//! whatever comes back into an `AnalysisResponse`.
//!
//! Outcomes:
//! - model available, reply holds valid JSON → `Structured`, `model_used` set
//! - model available, reply unparseable      → `Degraded` (raw text, still a success)
//! - model available, call fails             → `AnalysisError::RemoteCall`
//!   (or the heuristic result when `fallback_on_ai_error` is set)
//! - no model                                → heuristic, `fallback_analysis: true`

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::heuristic;
use crate::analysis::json_block::first_json_object;
use crate::analysis::models::{AnalysisResponse, AnalysisResult, RawAnalysis};
use crate::analysis::prompts::build_prompt;
use crate::llm_client::availability::ModelAvailability;
use crate::llm_client::{GenerativeModel, LlmError};

pub const UNPARSEABLE_NOTE: &str = "Could not parse JSON from response";
const RESPONSE_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    RemoteCall(#[from] LlmError),
}

pub async fn analyze(
    text: &str,
    availability: &ModelAvailability,
    fallback_on_ai_error: bool,
) -> Result<AnalysisResponse, AnalysisError> {
    let Some(model) = availability.model() else {
        info!("No model available; using heuristic analysis");
        return Ok(AnalysisResponse::Structured(heuristic::score(text)));
    };

    match analyze_with_model(text, model).await {
        Ok(response) => Ok(response),
        Err(e) if fallback_on_ai_error => {
            warn!(model = model.name(), error = %e, "AI analysis failed; falling back to heuristic");
            Ok(AnalysisResponse::Structured(heuristic::score(text)))
        }
        Err(e) => Err(AnalysisError::RemoteCall(e)),
    }
}

async fn analyze_with_model(
    text: &str,
    model: &dyn GenerativeModel,
) -> Result<AnalysisResponse, LlmError> {
    info!(model = model.name(), "Analyzing resume");
    let prompt = build_prompt(text);
    let reply = model.generate(&prompt).await?;

    let preview: String = reply.chars().take(RESPONSE_PREVIEW_CHARS).collect();
    debug!(%preview, "Model response received");

    Ok(normalize_reply(reply, model.name()))
}

/// Parses the first JSON object in a model reply. Anything that does not
/// decode into an `AnalysisResult` degrades to the raw text.
pub fn normalize_reply(reply: String, model_name: &str) -> AnalysisResponse {
    let parsed = first_json_object(&reply)
        .map(serde_json::from_str::<AnalysisResult>)
        .transpose();

    match parsed {
        Ok(Some(mut result)) => {
            result.model_used = Some(model_name.to_string());
            result.fallback_analysis = None;
            AnalysisResponse::Structured(result)
        }
        Ok(None) => {
            warn!(model = model_name, "No JSON object in model response");
            degraded(reply, model_name)
        }
        Err(e) => {
            warn!(model = model_name, error = %e, "Model response JSON did not match schema");
            degraded(reply, model_name)
        }
    }
}

fn degraded(reply: String, model_name: &str) -> AnalysisResponse {
    AnalysisResponse::Degraded(RawAnalysis {
        raw_analysis: reply,
        model_used: model_name.to_string(),
        note: UNPARSEABLE_NOTE.to_string(),
    })
}
