//! State and key handling for the interactive window.
//!
//! Everything here is independent of the terminal so it can be driven from
//! tests; `tui.rs` owns the screen and `ui.rs` draws this state.

use anyhow::Result;
use crossterm::event::KeyCode;
use std::collections::VecDeque;
use std::path::PathBuf;
use tally_core::{Summary, Transaction};
use tally_ingest::{ParseOptions, TextExtractor};
use tally_store::{TransactionStore, expand_pdf_paths, import_files};

pub const INITIAL_STATUS: &str = "Please select PDF file(s) to import transactions.";

/// Blocking message shown over the window until dismissed
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    fn parse_error(cause: &str) -> Self {
        Self {
            title: "PDF Parse Error".to_string(),
            body: format!("Failed to parse PDF:\n{cause}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Store order: newest date first
    #[default]
    DateDesc,
    AmountDesc,
    DescriptionAsc,
}

impl SortOrder {
    pub fn next(self) -> Self {
        match self {
            SortOrder::DateDesc => SortOrder::AmountDesc,
            SortOrder::AmountDesc => SortOrder::DescriptionAsc,
            SortOrder::DescriptionAsc => SortOrder::DateDesc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::DateDesc => "date ↓",
            SortOrder::AmountDesc => "amount ↓",
            SortOrder::DescriptionAsc => "description ↑",
        }
    }

    fn apply(self, rows: &mut [Transaction]) {
        match self {
            SortOrder::DateDesc => rows.sort_by(|a, b| b.trans_date.cmp(&a.trans_date)),
            SortOrder::AmountDesc => rows.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
            SortOrder::DescriptionAsc => rows.sort_by(|a, b| {
                a.description
                    .to_lowercase()
                    .cmp(&b.description.to_lowercase())
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    /// Typing paths for the next import
    SelectFiles { input: String },
}

pub struct App {
    store: TransactionStore,
    extractor: Box<dyn TextExtractor>,
    parse_opts: ParseOptions,
    pub selected_files: Vec<String>,
    pub summary: Summary,
    pub rows: Vec<Transaction>,
    pub selected_row: Option<usize>,
    pub sort: SortOrder,
    pub graph_visible: bool,
    pub status: String,
    pub notifications: VecDeque<Notification>,
    pub mode: Mode,
    pub should_quit: bool,
    /// Set after an import; the PDF reader may have written to stdout
    screen_dirty: bool,
}

impl App {
    /// Build the window state and load whatever the store already holds
    pub fn new(
        store: TransactionStore,
        extractor: Box<dyn TextExtractor>,
        parse_opts: ParseOptions,
    ) -> Result<Self> {
        let mut app = Self {
            store,
            extractor,
            parse_opts,
            selected_files: Vec::new(),
            summary: Summary::default(),
            rows: Vec::new(),
            selected_row: None,
            sort: SortOrder::default(),
            graph_visible: false,
            status: INITIAL_STATUS.to_string(),
            notifications: VecDeque::new(),
            mode: Mode::Browse,
            should_quit: false,
            screen_dirty: false,
        };
        app.refresh()?;
        Ok(app)
    }

    /// `Selected Files: a.pdf, b.pdf` or `Selected Files: None`
    pub fn files_label(&self) -> String {
        if self.selected_files.is_empty() {
            "Selected Files: None".to_string()
        } else {
            format!("Selected Files: {}", self.selected_files.join(", "))
        }
    }

    /// Label of the chart toggle, reflecting what pressing it will do
    pub fn graph_toggle_label(&self) -> &'static str {
        if self.graph_visible {
            "Hide Graph"
        } else {
            "Show Graph"
        }
    }

    /// Re-query the store for rows and totals
    pub fn refresh(&mut self) -> Result<()> {
        let mut rows = self.store.list_all()?;
        self.sort.apply(&mut rows);
        self.rows = rows;
        self.summary = self.store.summary()?;
        self.selected_row = match self.selected_row {
            _ if self.rows.is_empty() => None,
            Some(i) => Some(i.min(self.rows.len() - 1)),
            None => Some(0),
        };
        Ok(())
    }

    /// Import a file selection, queue an error notice per failed file, then redraw.
    /// An empty selection is ignored.
    pub fn select_files(&mut self, paths: Vec<PathBuf>) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let paths = match expand_pdf_paths(&paths) {
            Ok(p) => p,
            Err(err) => {
                self.notifications.push_back(Notification {
                    title: "File Selection Error".to_string(),
                    body: format!("{err:#}"),
                });
                return Ok(());
            }
        };
        if paths.is_empty() {
            self.status = "No PDF files found in the selection.".to_string();
            return Ok(());
        }

        let report = import_files(&self.store, self.extractor.as_ref(), &paths, &self.parse_opts)?;
        self.screen_dirty = true;

        self.selected_files = report.file_names();
        for failure in report.failures() {
            let cause = failure.error.as_deref().unwrap_or_default();
            self.notifications
                .push_back(Notification::parse_error(&format!("{}: {cause}", failure.file_name())));
        }
        self.status = report.status_line();
        self.refresh()
    }

    /// Whether the terminal needs a full repaint; resets the flag
    pub fn take_screen_dirty(&mut self) -> bool {
        std::mem::take(&mut self.screen_dirty)
    }

    /// Show or hide the summary chart; showing re-fetches the totals
    pub fn toggle_graph(&mut self) -> Result<()> {
        if self.graph_visible {
            self.graph_visible = false;
        } else {
            self.summary = self.store.summary()?;
            self.graph_visible = true;
        }
        Ok(())
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        self.sort.apply(&mut self.rows);
        if !self.rows.is_empty() {
            self.selected_row = Some(0);
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.rows.is_empty() {
            self.selected_row = None;
            return;
        }
        let last = self.rows.len() as isize - 1;
        let current = self.selected_row.unwrap_or(0) as isize;
        self.selected_row = Some((current + delta).clamp(0, last) as usize);
    }

    /// Apply one key press. Store errors propagate and end the session.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        // A pending notification swallows the key that dismisses it
        if !self.notifications.is_empty() {
            self.notifications.pop_front();
            return Ok(());
        }

        match &mut self.mode {
            Mode::SelectFiles { input } => match code {
                KeyCode::Esc => self.mode = Mode::Browse,
                KeyCode::Enter => {
                    let paths: Vec<PathBuf> = input.split_whitespace().map(PathBuf::from).collect();
                    self.mode = Mode::Browse;
                    self.select_files(paths)?;
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                _ => {}
            },
            Mode::Browse => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('o') => {
                    self.mode = Mode::SelectFiles {
                        input: String::new(),
                    }
                }
                KeyCode::Char('g') => self.toggle_graph()?,
                KeyCode::Char('s') => self.cycle_sort(),
                KeyCode::Char('r') => self.refresh()?,
                KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
                KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
                KeyCode::PageDown => self.move_selection(10),
                KeyCode::PageUp => self.move_selection(-10),
                KeyCode::Home => self.move_selection(isize::MIN / 2),
                KeyCode::End => self.move_selection(isize::MAX / 2),
                _ => {}
            },
        }
        Ok(())
    }
}
