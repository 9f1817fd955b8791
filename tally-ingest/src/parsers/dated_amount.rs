//! Generic "date, amount, description" statement line parser (text)
//!
//! Expected extracted-text rows:
//!   03/10  1,234.56  PR Deposit salary
//!   03/11  75.00  Payment to vendor
//!
//! Amounts are unsigned on the statement; the sign is inferred from the
//! description keywords.

use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;
use tally_core::{ISO_DATE_FORMAT, NewTransaction, apply_sign};

use crate::types::ParseOptions;

/// Description of the row emitted when a document yields no transactions
pub const PLACEHOLDER_DESCRIPTION: &str = "Sample Transaction";

fn parse_mm_dd_with_year(s: &str, year: i32) -> Option<NaiveDate> {
    let mut it = s.trim().split('/');
    let m: u32 = it.next()?.parse().ok()?;
    let d: u32 = it.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, m, d)
}

/// `MM/DD` as `YYYY-MM-DD`. Digits that don't name a real day in `year`
/// (13/45, 02/29 in 2025) are kept as written.
fn statement_date_text(mm_dd: &str, year: i32) -> String {
    if let Some(date) = parse_mm_dd_with_year(mm_dd, year) {
        return date.format(ISO_DATE_FORMAT).to_string();
    }
    let (mm, dd) = mm_dd.split_once('/').unwrap_or((mm_dd, ""));
    tracing::debug!(mm_dd, year, "statement date is not a calendar day; storing as written");
    format!("{year}-{mm}-{dd}")
}

/// Split on every line boundary a PDF text dump may carry: `\n`, `\r\n`, `\r`,
/// vertical tab, form feed, the file/group/record separators, NEL and the
/// Unicode line and paragraph separators.
fn statement_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c| {
        matches!(
            c,
            '\n' | '\r'
                | '\u{0b}'
                | '\u{0c}'
                | '\u{1c}'
                | '\u{1d}'
                | '\u{1e}'
                | '\u{85}'
                | '\u{2028}'
                | '\u{2029}'
        )
    })
}

/// Row emitted for documents with no matching lines.
///
/// Likely leftover debug behaviour; kept so every import shows at least one
/// row. Its date is fixed and ignores the configured statement year.
pub fn placeholder_transaction() -> NewTransaction {
    NewTransaction::with_date_text("2025-03-10", PLACEHOLDER_DESCRIPTION, 100.00)
}

/// Parse extracted statement text into signed transactions, in line order.
///
/// Only the first match on each line counts. A line whose description itself
/// starts with another `MM/DD` token is treated as a mis-captured multi-field
/// line and dropped.
pub fn parse_statement_text(text: &str, opts: &ParseOptions) -> Result<Vec<NewTransaction>> {
    // DATE AMOUNT DESCRIPTION
    let txn_re = Regex::new(concat!(
        r"(?P<date>\d{2}/\d{2})\s+",
        r"(?P<amount>[\d,]+\.\d{2})\s+",
        r"(?P<desc>.+)"
    ))?;
    let continuation_re = Regex::new(r"^\d{2}/\d{2}")?;

    let mut out = Vec::new();

    for line in statement_lines(text) {
        let Some(caps) = txn_re.captures(line) else {
            continue;
        };

        let desc = caps["desc"].trim();
        if continuation_re.is_match(desc) {
            tracing::trace!(line, "skipping continuation line");
            continue;
        }

        let amount: f64 = match caps["amount"].replace(',', "").parse() {
            Ok(a) => a,
            Err(_) => continue,
        };

        let date = statement_date_text(&caps["date"], opts.statement_year);
        out.push(NewTransaction::with_date_text(date, desc, apply_sign(desc, amount)));
    }

    if out.is_empty() && opts.placeholder_on_empty {
        tracing::debug!("no transaction lines matched; emitting placeholder row");
        out.push(placeholder_transaction());
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deposit_line() {
        let txns =
            parse_statement_text("03/10  1,234.56  PR Deposit salary", &ParseOptions::default())
                .unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].trans_date, "2025-03-10");
        assert_eq!(txns[0].description, "PR Deposit salary");
        assert_eq!(txns[0].amount, 1234.56);
    }

    #[test]
    fn test_parse_withdrawal_line() {
        let txns =
            parse_statement_text("03/11  75.00  Payment to vendor", &ParseOptions::default())
                .unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].trans_date, "2025-03-11");
        assert_eq!(txns[0].description, "Payment to vendor");
        assert_eq!(txns[0].amount, -75.00);
    }

    #[test]
    fn test_parse_statement_block_keeps_order() {
        let text = r#"
ACCOUNT SUMMARY
Beginning balance 1,000.00
04/01  2,500.00  PR Deposit ACME PAYROLL
04/02  45.10  Debit card GROCERY MART
Page 1 of 2
04/03  12.00  Coffee shop
04/05  300.00  Online Transfer to savings
"#;
        let txns = parse_statement_text(text, &ParseOptions::default()).unwrap();
        assert_eq!(txns.len(), 4);
        let amounts: Vec<f64> = txns.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![2500.00, -45.10, 12.00, -300.00]);
        assert_eq!(txns[2].trans_date, "2025-04-03");
    }

    #[test]
    fn test_match_may_start_mid_line() {
        let txns = parse_statement_text(
            "Posted 05/20 19.99 Debit STREAMING SERVICE",
            &ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "Debit STREAMING SERVICE");
        assert_eq!(txns[0].amount, -19.99);
    }

    #[test]
    fn test_continuation_line_is_dropped() {
        let text = "03/10  50.00  03/11 Payment to vendor\n03/12  10.00  Credit adjustment";
        let txns = parse_statement_text(text, &ParseOptions::default()).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "Credit adjustment");
    }

    #[test]
    fn test_configured_year() {
        let txns =
            parse_statement_text("12/31  5.00  Fee", &ParseOptions::with_year(2024)).unwrap();
        assert_eq!(txns[0].trans_date, "2024-12-31");
    }

    #[test]
    fn test_impossible_calendar_date_is_kept_as_written() {
        let text = "02/29  5.00  Leap day fee\n13/45  7.00  Bogus";
        let txns = parse_statement_text(text, &ParseOptions::default()).unwrap();
        assert_eq!(
            txns,
            vec![
                NewTransaction::with_date_text("2025-02-29", "Leap day fee", 5.00),
                NewTransaction::with_date_text("2025-13-45", "Bogus", 7.00),
            ]
        );
    }

    #[test]
    fn test_leap_day_in_leap_year() {
        let txns =
            parse_statement_text("02/29  5.00  Leap day fee", &ParseOptions::with_year(2024))
                .unwrap();
        assert_eq!(txns[0].trans_date, "2024-02-29");
    }

    #[test]
    fn test_form_feed_and_carriage_return_split_lines() {
        let text = "03/10  5.00  Fee\u{c}03/11  7.00  Payment\r\n03/12  1.00  Credit\r03/13  2.00  Debit";
        let txns = parse_statement_text(text, &ParseOptions::default()).unwrap();
        let rows: Vec<(&str, &str, f64)> = txns
            .iter()
            .map(|t| (t.trans_date.as_str(), t.description.as_str(), t.amount))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("2025-03-10", "Fee", 5.00),
                ("2025-03-11", "Payment", -7.00),
                ("2025-03-12", "Credit", 1.00),
                ("2025-03-13", "Debit", -2.00),
            ]
        );
    }

    #[test]
    fn test_unicode_line_separators_split_lines() {
        let text = "03/10  5.00  Fee\u{2028}03/11  7.00  Payment\u{85}03/12  1.00  Credit";
        let txns = parse_statement_text(text, &ParseOptions::default()).unwrap();
        assert_eq!(txns.len(), 3);
        assert_eq!(txns[2].description, "Credit");
    }

    #[test]
    fn test_amount_requires_two_fraction_digits() {
        let opts = ParseOptions {
            placeholder_on_empty: false,
            ..ParseOptions::default()
        };
        assert!(parse_statement_text("03/10  12  Cash", &opts).unwrap().is_empty());
    }

    #[test]
    fn test_zero_amount_kept() {
        let txns = parse_statement_text("03/10  0.00  Adjustment", &ParseOptions::default())
            .unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, 0.0);
    }

    #[test]
    fn test_placeholder_when_nothing_matches() {
        let txns = parse_statement_text("no rows here\njust headers", &ParseOptions::with_year(2030))
            .unwrap();
        assert_eq!(txns, vec![placeholder_transaction()]);
        assert_eq!(txns[0].trans_date, "2025-03-10");
        assert_eq!(txns[0].description, "Sample Transaction");
        assert_eq!(txns[0].amount, 100.00);
    }

    #[test]
    fn test_placeholder_can_be_disabled() {
        let opts = ParseOptions {
            placeholder_on_empty: false,
            ..ParseOptions::default()
        };
        assert!(parse_statement_text("", &opts).unwrap().is_empty());
    }
}
