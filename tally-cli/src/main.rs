use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally_core::{Summary, Transaction, display_date, format_money, totals_banner};
use tally_ingest::PdfTextExtractor;
use tally_store::{TransactionStore, expand_pdf_paths, import_files};

mod app;
mod config;
mod logging;
mod state;
mod tui;
mod ui;

use config::Config;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TALLY_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    long_version = LONG_VERSION,
    about = "Import bank statement PDFs and review deposits, withdrawals and balance"
)]
struct Cli {
    /// Config file (default: ~/.tally/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides [store] db_path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Year assumed for MM/DD statement rows (overrides [parser] statement_year)
    #[arg(long, global = true)]
    year: Option<i32>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive window (default)
    Ui {
        /// Statement PDFs (or folders of them) to import on startup
        files: Vec<PathBuf>,
    },

    /// Import statement PDFs without opening the window
    Import {
        /// Statement PDFs, or folders containing them
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print every stored transaction, newest first
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print deposit, withdrawal and balance totals
    Summary {
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a config file with default values (does not overwrite)
    Init,

    /// Print the effective configuration, after CLI overrides
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load_config(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        cfg.store.db_path = db;
    }
    if let Some(year) = cli.year {
        cfg.parser.statement_year = year;
    }

    match cli.command.unwrap_or(Command::Ui { files: Vec::new() }) {
        Command::Ui { files } => {
            logging::init_file(&cfg.log.level, &state::log_path()?)?;
            run_window(&cfg, files)?;
        }

        Command::Import { files } => {
            logging::init_stderr(&cfg.log.level)?;
            import(&cfg, &files)?;
        }

        Command::List { json } => {
            logging::init_stderr(&cfg.log.level)?;
            list(&cfg, json)?;
        }

        Command::Summary { json } => {
            logging::init_stderr(&cfg.log.level)?;
            summary(&cfg, json)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn open_store(cfg: &Config) -> Result<TransactionStore> {
    TransactionStore::open(&cfg.store.db_path)
        .with_context(|| format!("opening transaction store {}", cfg.store.db_path.display()))
}

fn run_window(cfg: &Config, files: Vec<PathBuf>) -> Result<()> {
    let store = open_store(cfg)?;
    tracing::info!(db = %store.db_path().display(), year = cfg.parser.statement_year, "starting window");

    let mut app = app::App::new(store, Box::new(PdfTextExtractor), cfg.parser)?;
    app.select_files(files)?;
    tui::run_ui(&mut app)
}

fn import(cfg: &Config, files: &[PathBuf]) -> Result<()> {
    let store = open_store(cfg)?;
    let paths = expand_pdf_paths(files)?;
    let report = import_files(&store, &PdfTextExtractor, &paths, &cfg.parser)?;

    for outcome in &report.files {
        match &outcome.error {
            Some(err) => eprintln!(
                "PDF Parse Error: Failed to parse PDF {}: {}",
                outcome.file_name(),
                err
            ),
            None => println!("{}: {} transactions", outcome.file_name(), outcome.imported),
        }
    }

    println!("\n{}", report.status_line());
    println!("{}", totals_banner(&store.summary()?));
    Ok(())
}

fn list(cfg: &Config, json: bool) -> Result<()> {
    let store = open_store(cfg)?;
    let rows = store.list_all()?;

    if json {
        println!("{}", list_json(&rows)?);
    } else {
        print!("{}", list_table(&rows));
    }
    Ok(())
}

fn summary(cfg: &Config, json: bool) -> Result<()> {
    let store = open_store(cfg)?;
    let summary = store.summary()?;

    if json {
        println!("{}", summary_json(&summary)?);
    } else {
        println!("{}", totals_banner(&summary));
    }
    Ok(())
}

/// Stored rows as a JSON array of `{id, trans_date, description, amount}`
fn list_json(rows: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

fn list_table(rows: &[Transaction]) -> String {
    let mut out = format!("{:<12} {:<48} {:>14}\n", "Date", "Description", "Amount");
    for t in rows {
        out.push_str(&format!(
            "{:<12} {:<48} {:>14}\n",
            display_date(&t.trans_date),
            t.description,
            format_money(t.amount)
        ));
    }
    out.push_str(&format!("\n{} transactions\n", rows.len()));
    out
}

/// `{deposits, withdrawals, balance}`; withdrawals keep their sign
fn summary_json(summary: &Summary) -> Result<String> {
    let value = serde_json::json!({
        "deposits": summary.deposits,
        "withdrawals": summary.withdrawals,
        "balance": summary.balance(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
