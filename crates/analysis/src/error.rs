//! Analysis error types

use schedlog_logger::LoggerError;
use thiserror::Error;

/// Errors from reading logs and benchmark result files
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV read or write failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Scheduler log could not be read
    #[error("log error: {0}")]
    Logger(#[from] LoggerError),

    /// A required field is absent
    #[error("{item}: missing field {field}")]
    MissingField {
        /// Item (pod, row) the field belongs to
        item: String,
        /// Field name
        field: &'static str,
    },

    /// Timestamp in an unexpected format
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Output contains no `real/user/sys` block
    #[error("no real/user/sys timings found in output")]
    MissingTimes,
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
