//! Import a selection of statement files into the store.
//!
//! Files are handled one at a time. A file whose text can't be extracted is
//! reported and contributes nothing; the rest of the selection still imports.
//! Store errors abort the whole import.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tally_ingest::{ParseOptions, TextExtractor, parse_statement_file};

use crate::store::TransactionStore;

/// Result of importing a single file
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub imported: usize,
    /// Extraction failure, with its cause chain
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn file_name(&self) -> String {
        file_name(&self.path)
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Per-file outcomes of one import action
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub files: Vec<FileOutcome>,
}

impl ImportReport {
    /// Total rows inserted across every file
    pub fn imported(&self) -> usize {
        self.files.iter().map(|f| f.imported).sum()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| f.is_failure())
    }

    /// Base names of every selected file, in selection order
    pub fn file_names(&self) -> Vec<String> {
        self.files.iter().map(FileOutcome::file_name).collect()
    }

    /// `Imported N transactions from M file(s).`
    pub fn status_line(&self) -> String {
        format!(
            "Imported {} transactions from {} file(s).",
            self.imported(),
            self.file_count()
        )
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Extract, parse, and insert every file in `paths`, in order.
pub fn import_files<E: TextExtractor + ?Sized>(
    store: &TransactionStore,
    extractor: &E,
    paths: &[PathBuf],
    opts: &ParseOptions,
) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for path in paths {
        let txns = match parse_statement_file(extractor, path, opts) {
            Ok(txns) => txns,
            Err(err) => {
                let cause = format!("{err:#}");
                tracing::warn!(path = %path.display(), error = %cause, "failed to parse statement");
                report.files.push(FileOutcome {
                    path: path.clone(),
                    imported: 0,
                    error: Some(cause),
                });
                continue;
            }
        };

        for txn in &txns {
            store
                .insert(txn)
                .with_context(|| format!("saving transactions from {}", path.display()))?;
        }

        tracing::info!(path = %path.display(), count = txns.len(), "imported statement");
        report.files.push(FileOutcome {
            path: path.clone(),
            imported: txns.len(),
            error: None,
        });
    }

    Ok(report)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Expand directory arguments into the `*.pdf` files they contain (sorted).
/// Other paths pass through untouched.
pub fn expand_pdf_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for path in paths {
        if !path.is_dir() {
            out.push(path.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in std::fs::read_dir(path).with_context(|| format!("read {}", path.display()))? {
            let p = entry?.path();
            if p.is_file() && has_pdf_extension(&p) {
                found.push(p);
            }
        }
        found.sort();
        out.extend(found);
    }
    Ok(out)
}
