use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports liveness and which Gemini model, if any, was selected at startup.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "gemini_available": state.availability.available(),
        "gemini_model": state.availability.selected_model_name(),
        "message": "Resume Analyzer API is running"
    }))
}
