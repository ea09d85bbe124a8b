//! Logger error types

use schedlog_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from writing or reading a scheduler log
#[derive(Debug, Error)]
pub enum LoggerError {
    /// I/O error on the log file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A log with the same name already exists and would be overwritten
    #[error("log file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Another run in the same directory started within the same second,
    /// so the timestamped default name is taken
    #[error(
        "log file already exists: {} (another run started in the same second)",
        .0.display()
    )]
    RunClash(PathBuf),

    /// Core ids passed to the logger cannot be written to a log line
    #[error("invalid core assignment: {0}")]
    InvalidCores(#[from] CoreError),

    /// A line of a log file could not be decoded
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Decoding failure
        #[source]
        source: CoreError,
    },

    /// Directory contains no `log*.txt` files
    #[error("no log files in {}", .0.display())]
    NoLogs(PathBuf),
}

impl LoggerError {
    /// Whether opening failed because the log file is already there
    pub fn is_already_exists(&self) -> bool {
        matches!(self, LoggerError::AlreadyExists(_) | LoggerError::RunClash(_))
    }

    /// Line number of a parse error, if this is one
    pub fn line(&self) -> Option<usize> {
        match self {
            LoggerError::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, LoggerError>;
