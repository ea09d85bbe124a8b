//! Offline analysis for scheduler experiments
//!
//! - [`timeline`]: replay a scheduler log, check the per-job lifecycle
//!   contract, and compute runtimes, pauses and makespan
//! - [`pods`]: PARSEC job times from `kubectl get pods -o json`
//! - [`timing`]: `real/user/sys` from `time` output, stored as CSV rows
//! - [`mcperf`]: latency/throughput rows from mcperf reports

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod mcperf;
pub mod pods;
pub mod timeline;
pub mod timing;

pub use error::{AnalysisError, Result};
pub use mcperf::{McperfReport, McperfRow};
pub use pods::{PodTime, PodTimes};
pub use timeline::{
    ContractViolation, JobRecord, JobState, JobSummary, Timeline, TimelineVerification, Violation,
};
pub use timing::{ProcessTimes, RunRecord, RunRecorder};
