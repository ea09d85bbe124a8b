//! Job enumeration
//!
//! The logger records events for a closed set of jobs: the memcached service,
//! the PARSEC batch benchmarks, and the reserved `scheduler` pseudo-job.
//!
//! | Job | Kind |
//! |-----|------|
//! | scheduler | reserved, global start/end markers only |
//! | memcached | long-running latency-critical service |
//! | blackscholes, canneal, dedup, ferret, freqmine, radix, vips | PARSEC batch jobs |

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A job tracked in the scheduler log
///
/// ## Invariant
///
/// `Scheduler` never appears in a per-job event. It is written only by the
/// logger itself for the first and last line of a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Job {
    /// Reserved pseudo-job for the global start/end markers
    Scheduler,
    /// memcached server
    Memcached,
    /// PARSEC blackscholes
    Blackscholes,
    /// PARSEC canneal
    Canneal,
    /// PARSEC dedup
    Dedup,
    /// PARSEC ferret
    Ferret,
    /// PARSEC freqmine
    Freqmine,
    /// PARSEC radix (SPLASH-2x)
    Radix,
    /// PARSEC vips
    Vips,
}

impl Job {
    /// All jobs, scheduler first
    pub const ALL: [Job; 9] = [
        Job::Scheduler,
        Job::Memcached,
        Job::Blackscholes,
        Job::Canneal,
        Job::Dedup,
        Job::Ferret,
        Job::Freqmine,
        Job::Radix,
        Job::Vips,
    ];

    /// All real workloads (everything except the scheduler pseudo-job)
    pub const WORKLOADS: [Job; 8] = [
        Job::Memcached,
        Job::Blackscholes,
        Job::Canneal,
        Job::Dedup,
        Job::Ferret,
        Job::Freqmine,
        Job::Radix,
        Job::Vips,
    ];

    /// Get all real workloads as a slice
    pub fn workloads() -> &'static [Job] {
        &Self::WORKLOADS
    }

    /// Name used in log lines
    pub const fn as_str(&self) -> &'static str {
        match self {
            Job::Scheduler => "scheduler",
            Job::Memcached => "memcached",
            Job::Blackscholes => "blackscholes",
            Job::Canneal => "canneal",
            Job::Dedup => "dedup",
            Job::Ferret => "ferret",
            Job::Freqmine => "freqmine",
            Job::Radix => "radix",
            Job::Vips => "vips",
        }
    }

    /// Whether this is the reserved scheduler pseudo-job
    pub const fn is_scheduler(&self) -> bool {
        matches!(self, Job::Scheduler)
    }

    /// Whether this job is a PARSEC batch benchmark
    pub const fn is_batch(&self) -> bool {
        !matches!(self, Job::Scheduler | Job::Memcached)
    }

    /// Kubernetes job name for batch benchmarks (`parsec-<name>`)
    pub fn kube_job_name(&self) -> Option<String> {
        self.is_batch().then(|| format!("parsec-{}", self.as_str()))
    }

    /// Resolve a job from a pod or job name such as `parsec-radix-7xk2p`
    ///
    /// Returns the first known job whose name appears as a dash-separated
    /// component of `name`.
    pub fn from_pod_name(name: &str) -> Option<Job> {
        name.split('-')
            .find_map(|part| Job::from_str(part).ok())
            .filter(|job| !job.is_scheduler())
    }
}

impl FromStr for Job {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Job::ALL
            .iter()
            .copied()
            .find(|job| job.as_str() == s)
            .ok_or_else(|| CoreError::UnknownJob(s.to_string()))
    }
}

impl std::fmt::Display for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
