use serde::{Deserialize, Serialize};

/// Year assumed for `MM/DD` statement rows unless configured otherwise
pub const DEFAULT_STATEMENT_YEAR: i32 = 2025;

/// Knobs for the statement line parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Rows only carry MM/DD; this supplies the year.
    pub statement_year: i32,
    /// Emit the "Sample Transaction" row when a document yields nothing.
    pub placeholder_on_empty: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            statement_year: DEFAULT_STATEMENT_YEAR,
            placeholder_on_empty: true,
        }
    }
}

impl ParseOptions {
    pub fn with_year(statement_year: i32) -> Self {
        Self {
            statement_year,
            ..Self::default()
        }
    }
}
