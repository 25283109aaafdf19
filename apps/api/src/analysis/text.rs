//! Text extraction — turns uploaded PDF bytes into one whitespace-normalized string.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("the uploaded file is not a readable PDF: {0}")]
    Unparsable(String),
}

/// Extracts the text of every page, skipping pages with no text layer,
/// and collapses all whitespace runs into single spaces.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed inputs instead of returning Err.
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|payload| {
        let reason = panic_message(payload.as_ref());
        warn!("PDF decoder panicked: {reason}");
        ExtractError::Unparsable(reason)
    })?
    .map_err(|e| ExtractError::Unparsable(e.to_string()))?;

    let page_count = pages.len();
    let joined = join_pages(&pages);
    let text = normalize_whitespace(&joined);

    debug!(page_count, chars = text.len(), "Extracted resume text");
    Ok(text)
}

/// Collapses every whitespace run (spaces, tabs, line breaks) into one space
/// and strips leading/trailing whitespace.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown decoder failure".to_string()
    }
}
