//! Deposit/withdrawal inference from statement descriptions.
//!
//! Statement lines carry an unsigned amount; the sign is recovered with a
//! keyword heuristic over the description text.

use serde::{Deserialize, Serialize};

/// Keywords marking money coming in. Checked before withdrawals.
pub const DEPOSIT_KEYWORDS: &[&str] = &["dep", "credit", "pr deposit"];

/// Keywords marking money going out.
pub const WITHDRAWAL_KEYWORDS: &[&str] = &["payment", "transfer", "debit", "withdrawal"];

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Polarity {
    #[serde(rename = "deposit")]
    Deposit,
    #[serde(rename = "withdrawal")]
    Withdrawal,
}

impl Polarity {
    /// Classify a signed amount; zero is a deposit
    pub fn of_amount(amount: f64) -> Self {
        if amount < 0.0 {
            Polarity::Withdrawal
        } else {
            Polarity::Deposit
        }
    }
}

/// Infer the direction of a statement line from its description.
///
/// Substring match on the lower-cased text. Deposit keywords win when both
/// sets match; no match at all falls back to deposit.
pub fn infer_polarity(description: &str) -> Polarity {
    let desc = description.to_lowercase();

    if DEPOSIT_KEYWORDS.iter().any(|k| desc.contains(k)) {
        return Polarity::Deposit;
    }

    if WITHDRAWAL_KEYWORDS.iter().any(|k| desc.contains(k)) {
        return Polarity::Withdrawal;
    }

    Polarity::Deposit
}

/// Give an unsigned amount the sign implied by `description`
pub fn apply_sign(description: &str, amount: f64) -> f64 {
    match infer_polarity(description) {
        Polarity::Deposit => amount,
        Polarity::Withdrawal => -amount,
    }
}
