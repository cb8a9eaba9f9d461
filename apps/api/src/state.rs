use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::availability::ModelAvailability;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; nothing in it changes while the server runs.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Resolved at startup. Decides between the Gemini and heuristic paths.
    pub availability: Arc<ModelAvailability>,
}
