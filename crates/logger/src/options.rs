//! Logger configuration
//!
//! [`LoggerOptions`] is a plain struct with presets; [`LoggerBuilder`] is the
//! chained form of the same settings.
//!
//! ```ignore
//! let logger = LoggerOptions::builder()
//!     .directory("./results/run-3")
//!     .strict()
//!     .open()?;
//! ```

use crate::durability::DurabilityMode;
use crate::error::Result;
use crate::logger::SchedulerLogger;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Prefix of generated log file names
pub const LOG_FILE_PREFIX: &str = "log";
/// Extension of generated log file names
pub const LOG_FILE_EXTENSION: &str = "txt";
/// Timestamp layout embedded in generated file names
pub const FILE_NAME_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// Where and how a [`SchedulerLogger`] writes
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    /// Directory the log file is created in (created if missing)
    pub directory: PathBuf,
    /// Fixed file name; `None` derives `log<YYYYMMDD_HHMMSS>.txt` from the
    /// start time
    pub file_name: Option<String>,
    /// Flush policy for appended lines
    pub durability: DurabilityMode,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        LoggerOptions {
            directory: PathBuf::from("."),
            file_name: None,
            durability: DurabilityMode::default(),
        }
    }
}

impl LoggerOptions {
    /// Buffer lines until the log ends
    pub fn buffered() -> Self {
        LoggerOptions {
            durability: DurabilityMode::Buffered,
            ..Default::default()
        }
    }

    /// Sync every line to disk
    pub fn strict() -> Self {
        LoggerOptions {
            durability: DurabilityMode::Strict,
            ..Default::default()
        }
    }

    /// Start a builder with default settings
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Path of the log file for a run started at `started`
    pub fn log_path(&self, started: NaiveDateTime) -> PathBuf {
        let name = match &self.file_name {
            Some(name) => name.clone(),
            None => default_file_name(started),
        };
        self.directory.join(name)
    }
}

/// `log<YYYYMMDD_HHMMSS>.txt` for a run started at `started`
pub fn default_file_name(started: NaiveDateTime) -> String {
    format!(
        "{}{}.{}",
        LOG_FILE_PREFIX,
        started.format(FILE_NAME_TIMESTAMP),
        LOG_FILE_EXTENSION
    )
}

/// Builder for [`SchedulerLogger`]
#[derive(Debug, Clone, Default)]
pub struct LoggerBuilder {
    options: LoggerOptions,
}

impl LoggerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory the log file is created in.
    pub fn directory(mut self, directory: impl AsRef<Path>) -> Self {
        self.options.directory = directory.as_ref().to_path_buf();
        self
    }

    /// Use a fixed file name instead of the timestamped default.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.options.file_name = Some(name.into());
        self
    }

    /// Set the durability mode.
    pub fn durability(mut self, mode: DurabilityMode) -> Self {
        self.options.durability = mode;
        self
    }

    /// Buffer lines until the log ends.
    pub fn buffered(self) -> Self {
        self.durability(DurabilityMode::Buffered)
    }

    /// Sync every line to disk.
    pub fn strict(self) -> Self {
        self.durability(DurabilityMode::Strict)
    }

    /// The options collected so far
    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    /// Create the log file and write the scheduler start record.
    pub fn open(self) -> Result<SchedulerLogger> {
        SchedulerLogger::open(self.options)
    }
}
