//! # schedlog
//!
//! Event logging and result scraping for scheduler experiments that co-locate
//! memcached with PARSEC batch jobs.
//!
//! An external scheduler decides which cores and threads each job gets. It
//! records those decisions through a [`SchedulerLogger`], one log file per
//! run. After the run the log can be read back, replayed into a [`Timeline`]
//! and checked against the job lifecycle, next to the job times scraped from
//! Kubernetes and the latency rows produced by mcperf.
//!
//! ## Quick Start
//!
//! ```ignore
//! use schedlog::prelude::*;
//!
//! let mut logger = SchedulerLogger::new()?;
//! logger.job_start(Job::Memcached, &["0"], 2)?;
//! logger.job_start(Job::Radix, &["1", "2", "3"], 3)?;
//! logger.update_cores(Job::Memcached, &["0", "1"])?;
//! logger.job_end(Job::Radix)?;
//! logger.job_end(Job::Memcached)?;
//! let path = logger.end()?;
//!
//! let timeline = Timeline::from_path(&path)?;
//! assert!(timeline.verify().is_valid);
//! ```
//!
//! ## Crates
//!
//! - [`types`]: jobs, events, and the log line format
//! - [`logger`]: the writer and reader
//! - [`analysis`]: timelines, pod times, `time` output, mcperf reports

#![warn(missing_docs)]

mod error;

pub mod prelude;

pub use error::{Error, Result};

pub use schedlog_analysis as analysis;
pub use schedlog_core as types;
pub use schedlog_logger as logger;

pub use schedlog_analysis::{McperfReport, PodTimes, ProcessTimes, RunRecorder, Timeline};
pub use schedlog_core::{EventKind, EventPayload, Job, LogEvent};
pub use schedlog_logger::{DurabilityMode, LogReader, LoggerOptions, SchedulerLogger};
