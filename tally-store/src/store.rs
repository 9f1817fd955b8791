//! Append-only transaction table backed by an embedded SQLite file.
//!
//! Every operation opens its own connection and closes it on return; nothing
//! is batched across calls.

use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use std::path::{Path, PathBuf};
use tally_core::{NewTransaction, Summary, Transaction};

/// Database location used when nothing else is configured
pub const DEFAULT_DB_RELATIVE_PATH: &str = "database/statements.db";

const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS transactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        trans_date TEXT,
        description TEXT,
        amount REAL
    );
";

#[derive(Debug, Clone)]
pub struct TransactionStore {
    db_path: PathBuf,
}

impl TransactionStore {
    /// Open the store at `db_path`, creating the directory and table if absent.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            db_path: db_path.into(),
        };
        store.init()?;
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn init(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
        }
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA_SQL)
            .with_context(|| format!("create schema in {}", self.db_path.display()))?;
        tracing::debug!(db = %self.db_path.display(), "transaction store ready");
        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .with_context(|| format!("open database {}", self.db_path.display()))
    }

    /// Append one row and return its id. Duplicates are stored as-is.
    pub fn insert(&self, txn: &NewTransaction) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO transactions (trans_date, description, amount) VALUES (?1, ?2, ?3)",
            params![txn.trans_date, txn.description, txn.amount],
        )
        .context("insert transaction")?;
        Ok(conn.last_insert_rowid())
    }

    /// Sum of positive amounts and sum of negative amounts; zero when empty.
    pub fn summary(&self) -> Result<Summary> {
        let conn = self.connect()?;
        let (deposits, withdrawals) = conn
            .query_row(
                "SELECT
                    COALESCE(SUM(CASE WHEN amount > 0 THEN amount ELSE 0 END), 0.0),
                    COALESCE(SUM(CASE WHEN amount < 0 THEN amount ELSE 0 END), 0.0)
                 FROM transactions",
                [],
                |row| Ok((row.get::<_, f64>(0)?, row.get::<_, f64>(1)?)),
            )
            .context("query transaction summary")?;
        Ok(Summary::new(deposits, withdrawals))
    }

    /// Every row, newest date first. Order among equal dates is unspecified.
    pub fn list_all(&self) -> Result<Vec<Transaction>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, trans_date, description, amount
                 FROM transactions
                 ORDER BY trans_date DESC",
            )
            .context("prepare transaction listing")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Transaction {
                    id: row.get(0)?,
                    trans_date: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    amount: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
                })
            })
            .context("list transactions")?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.context("read transaction row")?);
        }
        Ok(out)
    }
}
