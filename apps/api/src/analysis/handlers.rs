//! Axum route handler for resume analysis.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tracing::{debug, warn};

use crate::analysis::models::AnalysisResponse;
use crate::analysis::orchestrator::analyze;
use crate::errors::AppError;
use crate::extraction::{extract_text, UploadedDocument};
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const DEFAULT_FILENAME: &str = "upload";
/// Trimmed text shorter than this is rejected before any analysis runs.
pub const MIN_TEXT_CHARS: usize = 20;

/// POST /analyze_resume
///
/// Multipart upload with a `file` field (PDF, DOCX or plain text).
/// Extraction and validation happen before the model is ever called.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| {
        warn!("Request is not a multipart upload: {e}");
        AppError::MissingFile
    })?;

    let document = read_file_field(&mut multipart)
        .await?
        .ok_or(AppError::MissingFile)?;
    debug!(
        filename = %document.filename,
        bytes = document.bytes.len(),
        "File received"
    );

    let text = extract_text(document).await?;
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return Err(AppError::TextTooShort);
    }

    let response = analyze(
        &text,
        &state.availability,
        state.config.fallback_on_ai_error,
    )
    .await?;

    Ok(Json(response))
}

/// Finds the `file` upload, skipping any other form fields. A part without a
/// `filename` attribute is a plain text field, not an upload.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedDocument>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name() else {
            debug!("Skipping non-file form field named {FILE_FIELD}");
            continue;
        };

        let filename = if file_name.is_empty() {
            DEFAULT_FILENAME.to_string()
        } else {
            file_name.to_string()
        };
        let bytes = field.bytes().await?;

        return Ok(Some(UploadedDocument { filename, bytes }));
    }
    Ok(None)
}
