use std::fmt;
use std::io::Error;
use std::path::PathBuf;

use clap::Parser;
use polars::error::PolarsError;
use ratatui::crossterm::event::KeyEvent;

use crate::table::PageSize;

pub const HELP_TEXT: &str = "\
hrnet - keep track of your employees

Create Employee
  Tab / Down      next field
  BackTab / Up    previous field
  Left / Right    change State / Department
  a-z             jump to State / Department
  Enter           save employee
  Esc             go to the employee list

Current Employees
  Up/Down/Left/Right, hjkl   move the cursor
  s / Enter       sort by column (again to reverse)
  n / PageDown    next page
  p / PageUp      previous page
  g / Home        first page
  G / End         last page
  1-9             go to page
  +               change entries per page
  /               search
  x               clear search
  y               copy row to clipboard
  c               create employee
  ?               this help
  q               quit

Ctrl-C quits from anywhere. Esc closes this window.";

#[derive(Debug)]
pub enum HRError {
    IoError(Error),
    PolarsError(PolarsError),
    LoadingFailed(String),
    FileNotFound,
    PermissionDenied,
    UnknownFileType,
    MissingColumn(String),
    LoggingFailed(String),
}

impl fmt::Display for HRError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HRError::IoError(e) => write!(f, "I/O error: {e}"),
            HRError::PolarsError(e) => write!(f, "Could not read data: {e}"),
            HRError::LoadingFailed(reason) => write!(f, "Loading failed: {reason}"),
            HRError::FileNotFound => write!(f, "File not found"),
            HRError::PermissionDenied => write!(f, "Permission denied"),
            HRError::UnknownFileType => {
                write!(f, "Unknown file type, expected csv, parquet or arrow")
            }
            HRError::MissingColumn(name) => write!(f, "Employee file has no column \"{name}\""),
            HRError::LoggingFailed(reason) => write!(f, "Could not set up logging: {reason}"),
        }
    }
}

impl std::error::Error for HRError {}

impl From<Error> for HRError {
    fn from(err: Error) -> Self {
        HRError::IoError(err)
    }
}

impl From<PolarsError> for HRError {
    fn from(err: PolarsError) -> Self {
        HRError::PolarsError(err)
    }
}

#[derive(Debug)]
pub enum Message {
    Quit,
    Help,
    Exit,
    Enter,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    SortColumn,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    GoToPage(usize),
    CyclePageSize,
    Search,
    ClearSearch,
    CreateEmployee,
    CopyRow,
    RawKey(KeyEvent),
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "hrnet",
    version,
    about = "A terminal HR tool to create employees and browse the current ones."
)]
pub struct HRConfig {
    /// Employee file (csv, parquet or arrow) loaded into the session at start
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Employees shown per page: 10, 25, 50 or 100
    #[arg(short = 'n', long, default_value = "10", value_parser = parse_page_size)]
    pub page_size: PageSize,

    /// Start on the employee list instead of the creation form
    #[arg(long)]
    pub list: bool,

    /// Milliseconds to wait for terminal events per loop iteration
    #[arg(long, default_value_t = 100)]
    pub event_poll_time: u64,

    /// Widest a table column is drawn, in characters
    #[arg(long, default_value_t = 24)]
    pub max_column_width: usize,

    /// Write logs to this file, logging is off without it
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn parse_page_size(s: &str) -> Result<PageSize, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let cfg = HRConfig::parse_from(["hrnet"]);
        assert_eq!(cfg.page_size, PageSize::Ten);
        assert_eq!(cfg.event_poll_time, 100);
        assert_eq!(cfg.max_column_width, 24);
        assert!(!cfg.list);
        assert!(cfg.seed.is_none());
    }

    #[test]
    fn config_rejects_unknown_page_size() {
        assert!(HRConfig::try_parse_from(["hrnet", "-n", "30"]).is_err());
        let cfg = HRConfig::parse_from(["hrnet", "-n", "50", "--seed", "~/staff.csv"]);
        assert_eq!(cfg.page_size, PageSize::Fifty);
        assert_eq!(cfg.seed.as_deref(), Some("~/staff.csv"));
    }
}
