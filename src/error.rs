//! Unified error type for schedlog.
//!
//! Wraps the per-crate errors so callers that use several crates can hold a
//! single error type.

use thiserror::Error;

/// All schedlog errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Log line could not be decoded
    #[error("parse error: {0}")]
    Parse(#[from] schedlog_core::CoreError),

    /// Writing or reading a log failed
    #[error("log error: {0}")]
    Log(#[from] schedlog_logger::LoggerError),

    /// Reading a result file failed
    #[error("analysis error: {0}")]
    Analysis(#[from] schedlog_analysis::AnalysisError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for schedlog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error came from malformed input rather than I/O.
    pub fn is_malformed_input(&self) -> bool {
        use schedlog_analysis::AnalysisError as AE;
        use schedlog_logger::LoggerError as LE;
        match self {
            Error::Parse(_) => true,
            Error::Log(LE::Parse { .. } | LE::InvalidCores(_)) => true,
            Error::Analysis(AE::Logger(LE::Parse { .. })) => true,
            Error::Analysis(
                AE::Json(_) | AE::MissingField { .. } | AE::InvalidTimestamp(_) | AE::MissingTimes,
            ) => true,
            _ => false,
        }
    }

    /// Check if the error is a log file that would have been overwritten.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::Log(err) if err.is_already_exists())
    }
}
