//! Convenient imports for schedlog.
//!
//! ```ignore
//! use schedlog::prelude::*;
//!
//! let mut logger = SchedulerLogger::new()?;
//! logger.job_start(Job::Vips, &[0, 1], 2)?;
//! ```

// Writing
pub use schedlog_logger::{DurabilityMode, LoggerBuilder, LoggerOptions, SchedulerLogger};

// Reading
pub use schedlog_logger::LogReader;

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use schedlog_core::{CoreAssignment, EventKind, EventPayload, Job, LogEvent};

// Analysis
pub use schedlog_analysis::{
    JobState, JobSummary, McperfReport, PodTimes, ProcessTimes, RunRecord, RunRecorder, Timeline,
};
