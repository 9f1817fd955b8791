use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tally_core::{NewTransaction, display_date, totals_banner};
use tally_ingest::{ParseOptions, TextExtractor};
use tally_store::{TransactionStore, import_files};
use uuid::Uuid;

/// Text as pdf-extract returns it for a two-page checking statement
const CHECKING_STATEMENT: &str = "\
FIRST COMMUNITY BANK
Statement Period 03/01 - 03/31
DATE AMOUNT DESCRIPTION
03/03  2,150.00  PR Deposit ACME CORP PAYROLL
03/05  64.12  Debit Card Purchase GROCERY OUTLET
03/07  1,200.00  Online Transfer to Savings
03/09  18.75  Coffee Roasters
\u{c}
Page 2
03/15  2,150.00  PR Deposit ACME CORP PAYROLL
03/18  99.00  03/17 Card Payment
03/20  500.00  ATM Withdrawal
03/28  3.21  Interest Credit
Ending balance 4,534.09
";

struct InMemoryPdf(&'static str);

impl TextExtractor for InMemoryPdf {
    fn extract_text(&self, _path: &Path) -> Result<String> {
        Ok(self.0.to_string())
    }
}

fn temp_store(name: &str) -> TransactionStore {
    let mut p = std::env::temp_dir();
    p.push(format!("tally_roundtrip_{}_{}", name, Uuid::new_v4()));
    TransactionStore::open(p.join("statements.db")).unwrap()
}

#[test]
fn test_statement_import_end_to_end() {
    let store = temp_store("e2e");
    let report = import_files(
        &store,
        &InMemoryPdf(CHECKING_STATEMENT),
        &[PathBuf::from("march-2025.pdf")],
        &ParseOptions::default(),
    )
    .unwrap();

    // the 03/18 line is a mis-captured two-date line and is dropped
    assert_eq!(report.imported(), 7);
    assert_eq!(report.failures().count(), 0);

    let rows = store.list_all().unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0].trans_date, "2025-03-28");
    assert_eq!(display_date(&rows[0].trans_date), "03/28/2025");
    assert_eq!(rows[0].description, "Interest Credit");
    assert_eq!(rows.last().unwrap().trans_date, "2025-03-03");

    let withdrawals: Vec<f64> = rows.iter().filter(|r| r.amount < 0.0).map(|r| r.amount).collect();
    assert_eq!(withdrawals, vec![-500.00, -1200.00, -64.12]);

    let summary = store.summary().unwrap();
    assert!((summary.deposits - 4321.96).abs() < 1e-6);
    assert!((summary.withdrawals + 1764.12).abs() < 1e-6);
    assert_eq!(
        totals_banner(&summary),
        "Deposits: $4321.96    Withdrawals: $1764.12    Balance: $2557.84"
    );
}

#[test]
fn test_insert_then_list_round_trip() {
    let store = temp_store("roundtrip");
    let inputs = [
        ("2025-02-14", "Valentine dinner", -82.40),
        ("2025-04-01", "PR Deposit salary", 3000.00),
        ("2025-01-31", "Refund credit", 15.99),
        ("2025-03-15", "Rent payment", -1450.00),
    ];
    for (date, desc, amount) in inputs {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        store.insert(&NewTransaction::new(date, desc, amount)).unwrap();
    }

    let rows = store.list_all().unwrap();
    assert_eq!(rows.len(), inputs.len());

    let dates: Vec<String> = rows.iter().map(|r| display_date(&r.trans_date)).collect();
    assert_eq!(dates, vec!["04/01/2025", "03/15/2025", "02/14/2025", "01/31/2025"]);

    for (date, desc, amount) in inputs {
        let row = rows.iter().find(|r| r.trans_date == date).unwrap();
        assert_eq!(row.description, desc);
        assert_eq!(row.amount, amount);
    }
}

#[test]
fn test_summary_matches_documented_example() {
    let store = temp_store("summary");
    let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    for amount in [100.00, -40.00, 5.00] {
        store.insert(&NewTransaction::new(date, "row", amount)).unwrap();
    }

    let summary = store.summary().unwrap();
    assert_eq!(summary.deposits, 105.00);
    assert_eq!(summary.withdrawals, -40.00);
    assert_eq!(summary.balance(), 65.00);
}

#[test]
fn test_document_without_rows_imports_placeholder() {
    let store = temp_store("placeholder");
    let report = import_files(
        &store,
        &InMemoryPdf("Thank you for banking with us.\nNo activity.\n"),
        &[PathBuf::from("quiet.pdf")],
        &ParseOptions::default(),
    )
    .unwrap();

    assert_eq!(report.imported(), 1);
    let rows = store.list_all().unwrap();
    assert_eq!(rows[0].trans_date, "2025-03-10");
    assert_eq!(rows[0].description, "Sample Transaction");
    assert_eq!(rows[0].amount, 100.00);
}
