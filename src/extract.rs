//! PDF text extraction.
//!
//! Parsing is delegated to `pdf-extract`. Pages are extracted one at a time
//! and concatenated in page order with no separator added between them.

use std::path::Path;

use crate::error::ChatError;

pub const MIME_PDF: &str = "application/pdf";

/// Extracts the text of every page, in page order.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, ChatError> {
    pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ChatError::InvalidPdf(e.to_string()))
}

/// Extracts the whole document as one string.
pub fn extract_text(bytes: &[u8]) -> Result<String, ChatError> {
    Ok(extract_pages(bytes)?.concat())
}

/// Accepts only paths with a `.pdf` extension (any case).
pub fn ensure_pdf_path(path: &Path) -> Result<(), ChatError> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if is_pdf {
        Ok(())
    } else {
        Err(ChatError::UnsupportedUpload(format!(
            "{} is not a .pdf file",
            path.display()
        )))
    }
}

/// Accepts `application/pdf`, with or without parameters.
pub fn ensure_pdf_content_type(content_type: Option<&str>) -> Result<(), ChatError> {
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());
    match essence.as_deref() {
        Some(MIME_PDF) => Ok(()),
        Some(other) => Err(ChatError::UnsupportedUpload(format!(
            "content-type {} is not {}",
            other, MIME_PDF
        ))),
        None => Err(ChatError::UnsupportedUpload(format!(
            "missing content-type, expected {}",
            MIME_PDF
        ))),
    }
}
