use lopdf::Document;
use tracing::{debug, warn};

use super::ExtractionError;

/// Joins the text of every page in page order, one `\n` between pages.
/// A page that yields nothing (scanned image, unsupported font encoding)
/// contributes an empty line instead of failing the document.
pub(super) fn extract_pages(bytes: &[u8]) -> Result<String, ExtractionError> {
    let document =
        Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    // get_pages is keyed by page number, so iteration is already in page order
    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();

    let pages: Vec<String> = page_numbers
        .iter()
        .map(|&page| match document.extract_text(&[page]) {
            // lopdf ends every text object with a newline
            Ok(text) => text.trim_end_matches('\n').to_string(),
            Err(e) => {
                warn!(page, error = %e, "PDF page yielded no text");
                String::new()
            }
        })
        .collect();

    debug!(page_count = pages.len(), "PDF text extraction complete");
    Ok(pages.join("\n"))
}
