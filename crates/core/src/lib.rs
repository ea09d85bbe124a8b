//! Core types for scheduler event logs
//!
//! This crate defines the data model shared by the logger and the analysis
//! tooling:
//! - [`Job`]: the closed set of tracked jobs, including the reserved
//!   scheduler pseudo-job
//! - [`EventKind`] / [`EventPayload`]: what happened to a job
//! - [`LogEvent`]: one line of a log file, with its text codec
//! - [`encoding`]: the free-text comment encoding used by `custom` events

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoding;
pub mod error;
pub mod event;
pub mod job;

pub use encoding::{decode_comment, encode_comment};
pub use error::{CoreError, Result};
pub use event::{
    core_ids, format_cores, parse_timestamp, CoreAssignment, EventKind, EventPayload, LogEvent,
    TIMESTAMP_FORMAT,
};
pub use job::Job;
