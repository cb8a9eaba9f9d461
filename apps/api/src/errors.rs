use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::orchestrator::AnalysisError;
use crate::extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("file field required")]
    MissingFile,

    #[error("Could not extract text from file or file too small")]
    TextTooShort,

    #[error("Could not read upload: {message}")]
    Upload { status: StatusCode, message: String },

    #[error("Could not read uploaded file: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("AI request failed: {0}")]
    AiRequest(#[from] AnalysisError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingFile | AppError::TextTooShort => {
                tracing::warn!("Rejected upload: {self}");
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            AppError::Upload { status, message } => {
                tracing::warn!("Malformed upload: {message}");
                (
                    *status,
                    json!({
                        "error": "Could not read upload",
                        "detail": message,
                    }),
                )
            }
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "Could not read uploaded file",
                        "detail": e.to_string(),
                    }),
                )
            }
            AppError::AiRequest(e) => {
                tracing::error!("AI analysis failed: {e}");
                // no heuristic result is attached despite fallback_used;
                // FALLBACK_ON_AI_ERROR serves one instead of this error
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "AI request failed",
                        "detail": e.to_string(),
                        "fallback_used": true,
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        // 413 when the body limit was hit, 400 for a malformed stream
        AppError::Upload {
            status: e.status(),
            message: e.body_text(),
        }
    }
}
