//! Scheduler event logger
//!
//! This crate writes and reads scheduler event logs:
//! - [`SchedulerLogger`]: append-only writer, one file per scheduler run
//! - [`LoggerOptions`] / [`LoggerBuilder`]: where the file goes and how
//!   eagerly it is flushed ([`DurabilityMode`])
//! - [`LogReader`]: parse a log file back into [`LogEvent`]s
//!
//! ## Usage
//!
//! ```ignore
//! use schedlog_logger::SchedulerLogger;
//! use schedlog_core::Job;
//!
//! let mut logger = SchedulerLogger::new()?;
//! logger.job_start(Job::Radix, &["0", "1"], 2)?;
//! logger.update_cores(Job::Radix, &["0", "1", "2"])?;
//! logger.job_end(Job::Radix)?;
//! let path = logger.end()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod durability;
pub mod error;
pub mod logger;
pub mod options;
pub mod reader;

pub use durability::DurabilityMode;
pub use error::{LoggerError, Result};
pub use logger::SchedulerLogger;
pub use options::{LoggerBuilder, LoggerOptions};
pub use reader::{find_logs, latest_log, LogReader};

pub use schedlog_core::{Job, LogEvent};
