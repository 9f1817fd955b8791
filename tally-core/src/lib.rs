//! tally-core: transaction model, sign inference, and display formatting

pub mod display;
pub mod polarity;
pub mod transaction;

pub use display::{ChartBar, display_date, format_amount, format_money, summary_bars, totals_banner};
pub use polarity::{Polarity, apply_sign, infer_polarity};
pub use transaction::{ISO_DATE_FORMAT, NewTransaction, Summary, Transaction};
