//! tally-store: SQLite transaction store and the multi-file statement importer

pub mod import;
pub mod store;

pub use import::{FileOutcome, ImportReport, expand_pdf_paths, import_files};
pub use store::{DEFAULT_DB_RELATIVE_PATH, TransactionStore};
