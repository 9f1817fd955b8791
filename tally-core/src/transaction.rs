//! Transaction record types shared by the parser, the store, and the UI

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::polarity::Polarity;

/// ISO date format used for the `trans_date` column
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A parsed statement line, not yet persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTransaction {
    /// Date text written to the store: YYYY-MM-DD, or the statement's digits
    /// as written when they don't name a real day
    pub trans_date: String,
    /// Free-form text as it appeared on the statement line
    pub description: String,
    /// Positive = deposit, negative = withdrawal
    pub amount: f64,
}

impl NewTransaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: f64) -> Self {
        Self::with_date_text(date.format(ISO_DATE_FORMAT).to_string(), description, amount)
    }

    /// Keep `trans_date` exactly as given, without calendar validation
    pub fn with_date_text(
        trans_date: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            trans_date: trans_date.into(),
            description: description.into(),
            amount,
        }
    }
}

/// A stored transaction row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Surrogate key assigned by the store
    pub id: i64,
    /// Stored date text, normally YYYY-MM-DD
    pub trans_date: String,
    pub description: String,
    pub amount: f64,
}

impl Transaction {
    /// Row classification used for colouring; zero counts as a deposit.
    pub fn polarity(&self) -> Polarity {
        Polarity::of_amount(self.amount)
    }
}

/// Aggregate totals over every stored transaction
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    /// Sum of all positive amounts
    pub deposits: f64,
    /// Sum of all negative amounts (zero or negative)
    pub withdrawals: f64,
}

impl Summary {
    pub fn new(deposits: f64, withdrawals: f64) -> Self {
        Self {
            deposits,
            withdrawals,
        }
    }

    /// Net of deposits and withdrawals
    pub fn balance(&self) -> f64 {
        self.deposits + self.withdrawals
    }

    /// Withdrawals as a positive number, for display
    pub fn withdrawals_abs(&self) -> f64 {
        self.withdrawals.abs()
    }
}
