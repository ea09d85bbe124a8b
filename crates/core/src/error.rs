//! Error types for the log data model

use thiserror::Error;

/// Errors raised while decoding log text into typed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Job name is not part of the known job set
    #[error("unknown job: {0}")]
    UnknownJob(String),

    /// Event kind is not one of start/end/pause/unpause/update_cores/custom
    #[error("unknown event kind: {0}")]
    UnknownEventKind(String),

    /// Line does not follow `<timestamp> <event> <job> <args>`
    #[error("malformed line: {reason}")]
    MalformedLine {
        /// What was wrong with the line
        reason: String,
    },

    /// Timestamp field is not an ISO-8601 local date-time
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Core id is empty or contains whitespace, `,`, `[` or `]`
    #[error("invalid core id: {0:?}")]
    InvalidCoreId(String),

    /// Comment is not valid percent-encoded UTF-8
    #[error("invalid comment encoding: {0}")]
    InvalidEncoding(String),
}

impl CoreError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CoreError::MalformedLine {
            reason: reason.into(),
        }
    }
}

/// Result type for core decoding operations
pub type Result<T> = std::result::Result<T, CoreError>;
