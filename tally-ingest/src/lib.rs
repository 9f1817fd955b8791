//! tally-ingest: PDF text extraction and statement line parsing.

pub mod extract;
pub mod parsers;
pub mod types;

use anyhow::Result;
use std::path::Path;
use tally_core::NewTransaction;

pub use extract::{PdfTextExtractor, TextExtractor};
pub use parsers::dated_amount::{PLACEHOLDER_DESCRIPTION, parse_statement_text, placeholder_transaction};
pub use types::{DEFAULT_STATEMENT_YEAR, ParseOptions};

/// Extract the text of one statement file and parse its transaction lines.
///
/// Extraction failures are returned as errors; lines that don't match are
/// skipped silently.
pub fn parse_statement_file<E: TextExtractor + ?Sized>(
    extractor: &E,
    path: &Path,
    opts: &ParseOptions,
) -> Result<Vec<NewTransaction>> {
    let text = extractor.extract_text(path)?;
    parse_statement_text(&text, opts)
}
