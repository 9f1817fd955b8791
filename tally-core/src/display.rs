//! Text formatting for the totals banner, table rows, and summary chart

use chrono::NaiveDate;
use serde::Serialize;

use crate::transaction::{ISO_DATE_FORMAT, Summary};

/// Date format shown in the transaction table
pub const DISPLAY_DATE_FORMAT: &str = "%m/%d/%Y";

/// Reformat a stored ISO date as MM/DD/YYYY; anything else is shown verbatim.
pub fn display_date(trans_date: &str) -> String {
    match NaiveDate::parse_from_str(trans_date, ISO_DATE_FORMAT) {
        Ok(d) => d.format(DISPLAY_DATE_FORMAT).to_string(),
        Err(_) => trans_date.to_string(),
    }
}

/// `$` prefix followed by the signed value with two decimals (e.g. `$-40.00`)
pub fn format_money(value: f64) -> String {
    format!("${:.2}", value)
}

/// Bare two-decimal value, used for chart annotations
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// `Deposits: $D    Withdrawals: $W    Balance: $B`
///
/// Withdrawals are shown as an absolute value.
pub fn totals_banner(summary: &Summary) -> String {
    format!(
        "Deposits: {}    Withdrawals: {}    Balance: {}",
        format_money(summary.deposits),
        format_money(summary.withdrawals_abs()),
        format_money(summary.balance())
    )
}

/// One bar of the summary chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: f64,
}

impl ChartBar {
    /// Text drawn above the bar
    pub fn annotation(&self) -> String {
        format_amount(self.value)
    }
}

/// Deposits, absolute withdrawals, and net balance, in that order
pub fn summary_bars(summary: &Summary) -> [ChartBar; 3] {
    [
        ChartBar {
            label: "Deposits",
            value: summary.deposits,
        },
        ChartBar {
            label: "Withdrawals",
            value: summary.withdrawals_abs(),
        },
        ChartBar {
            label: "Balance",
            value: summary.balance(),
        },
    ]
}
