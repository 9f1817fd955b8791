//! Plain-text extraction from statement files.

use anyhow::{Context, Result, anyhow};
use std::panic::{self, UnwindSafe};
use std::path::Path;

/// Source of the raw text a statement parser runs over
pub trait TextExtractor {
    /// Concatenated text of every page in the document at `path`
    fn extract_text(&self, path: &Path) -> Result<String>;
}

/// Extracts page text from PDF documents via `pdf-extract`
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

        // pdf-extract panics on some malformed documents instead of erroring
        let extracted = catch_unwind_quietly(|| pdf_extract::extract_text_from_mem(&bytes))
            .map_err(|_| anyhow!("PDF reader crashed on {}", path.display()))?;

        let text = extracted.map_err(|e| anyhow!("extracting text from {}: {e}", path.display()))?;
        tracing::debug!(path = %path.display(), chars = text.len(), "extracted pdf text");
        Ok(text)
    }
}

/// `catch_unwind` with the panic hook silenced, so a crash inside the PDF
/// reader doesn't print over a raw-mode terminal. The previous hook is
/// restored before returning.
fn catch_unwind_quietly<F, R>(f: F) -> std::thread::Result<R>
where
    F: FnOnce() -> R + UnwindSafe,
{
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        tracing::debug!(%info, "panic inside text extraction");
    }));
    let result = panic::catch_unwind(f);
    panic::set_hook(previous);
    result
}
