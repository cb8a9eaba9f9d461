//! Startup probe that decides whether the remote analysis path is usable.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::llm_client::{GeminiClient, GeminiModel, GenerativeModel, LlmError, ModelInfo};

/// Preferred model names, checked in order. First match wins.
pub const PREFERRED_MODELS: [&str; 3] = ["gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"];

/// Whether and which generative model can be called. Built once at startup
/// and shared read-only with every handler.
#[derive(Clone)]
pub struct ModelAvailability {
    model: Option<Arc<dyn GenerativeModel>>,
}

impl ModelAvailability {
    pub fn unavailable() -> Self {
        Self { model: None }
    }

    pub fn with_model(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model: Some(model) }
    }

    pub fn available(&self) -> bool {
        self.model.is_some()
    }

    pub fn selected_model_name(&self) -> Option<&str> {
        self.model.as_deref().map(|m| m.name())
    }

    pub fn model(&self) -> Option<&dyn GenerativeModel> {
        self.model.as_deref()
    }

    /// Probes the provider and picks a model. Never fails: any problem
    /// leaves the service in heuristic-only mode.
    pub async fn resolve(config: &Config) -> Self {
        let Some(api_key) = config.gemini_api_key.clone() else {
            info!("GEMINI_API_KEY not set; using heuristic analysis only");
            return Self::unavailable();
        };

        match probe(config, api_key).await {
            Ok(Some(model)) => {
                info!(model = model.name(), "Gemini configured");
                Self::with_model(Arc::new(model))
            }
            Ok(None) => {
                warn!("No Gemini model supporting {} found", super::GENERATE_CONTENT);
                Self::unavailable()
            }
            Err(e) => {
                warn!(error = %e, "Gemini configuration failed; using heuristic analysis only");
                Self::unavailable()
            }
        }
    }
}

async fn probe(config: &Config, api_key: String) -> Result<Option<GeminiModel>, LlmError> {
    let client = GeminiClient::new(&config.gemini_api_base, api_key, config.ai_timeout)?;
    let models = client.list_models().await?;
    Ok(select_model(&models).map(|name| GeminiModel::new(client, name.to_string())))
}

/// Picks a generation-capable model by `PREFERRED_MODELS` order, else the
/// first capable one in listing order. Listing order is provider-defined, so
/// the last-resort pick may vary between deployments.
pub fn select_model(models: &[ModelInfo]) -> Option<&str> {
    let capable: Vec<&ModelInfo> = models.iter().filter(|m| m.supports_generation()).collect();

    PREFERRED_MODELS
        .iter()
        .find_map(|preferred| capable.iter().copied().find(|m| m.name.contains(*preferred)))
        .or_else(|| capable.first().copied())
        .map(|m| m.name.as_str())
}
