//! PARSEC job times from `kubectl get pods -o json`
//!
//! Each item contributes a start and a completion instant. The start is
//! `status.startTime`, falling back to
//! `status.containerStatuses[0].state.terminated.startedAt`. The completion is
//! the terminated container's `finishedAt`, or `status.completionTime` for a
//! Job object (`kubectl get jobs -o json`) that succeeded. Items without any
//! start, such as pods still `Pending`, are kept as not started. Timestamps
//! use `%Y-%m-%dT%H:%M:%SZ` (UTC).

use crate::error::{AnalysisError, Result};
use chrono::{Duration, NaiveDateTime};
use schedlog_core::Job;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Timestamp layout used by the Kubernetes API
pub const KUBE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Deserialize)]
struct ItemList {
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    metadata: Metadata,
    #[serde(default)]
    status: Status,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Status {
    start_time: Option<String>,
    completion_time: Option<String>,
    succeeded: Option<u32>,
    #[serde(default)]
    container_statuses: Vec<ContainerStatus>,
}

#[derive(Debug, Deserialize)]
struct ContainerStatus {
    #[serde(default)]
    state: ContainerState,
}

#[derive(Debug, Default, Deserialize)]
struct ContainerState {
    terminated: Option<Terminated>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Terminated {
    started_at: Option<String>,
    finished_at: Option<String>,
}

/// Start and completion of one pod or job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodTime {
    /// `metadata.name`
    pub name: String,
    /// Job the name resolves to, if any
    pub job: Option<Job>,
    /// Start instant (UTC), `None` while not yet scheduled
    pub started: Option<NaiveDateTime>,
    /// Completion instant (UTC), `None` while still running
    pub completed: Option<NaiveDateTime>,
}

impl PodTime {
    /// Completion minus start
    pub fn duration(&self) -> Option<Duration> {
        Some(self.completed? - self.started?)
    }

    /// Whether the item has no start time yet
    pub fn is_pending(&self) -> bool {
        self.started.is_none()
    }

    /// Whether this item is a PARSEC batch job
    pub fn is_batch(&self) -> bool {
        self.job.map(|job| job.is_batch()).unwrap_or(false)
    }
}

/// Times of every item in a pod/job listing
#[derive(Debug, Clone, Default)]
pub struct PodTimes {
    items: Vec<PodTime>,
}

impl PodTimes {
    /// Parse `kubectl get pods -o json` (or `get jobs -o json`) output
    pub fn from_json(json: &str) -> Result<Self> {
        let list: ItemList = serde_json::from_str(json)?;
        let mut items = Vec::with_capacity(list.items.len());

        for item in list.items {
            let name = item.metadata.name;
            let terminated = item
                .status
                .container_statuses
                .first()
                .and_then(|status| status.state.terminated.as_ref());

            let started = item
                .status
                .start_time
                .as_deref()
                .or_else(|| terminated.and_then(|t| t.started_at.as_deref()));
            let completed = match terminated.and_then(|t| t.finished_at.as_deref()) {
                Some(finished) => Some(finished),
                // a Job's completionTime only counts once it succeeded
                None if item.status.succeeded.unwrap_or(0) >= 1 => {
                    item.status.completion_time.as_deref()
                }
                None => None,
            };

            items.push(PodTime {
                job: Job::from_pod_name(&name),
                started: started.map(parse_kube_time).transpose()?,
                completed: completed.map(parse_kube_time).transpose()?,
                name,
            });
        }

        Ok(PodTimes { items })
    }

    /// Read and parse a saved listing such as `pods.json`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// All items in listing order
    pub fn items(&self) -> &[PodTime] {
        &self.items
    }

    /// PARSEC batch items only
    pub fn batch(&self) -> impl Iterator<Item = &PodTime> {
        self.items.iter().filter(|item| item.is_batch())
    }

    /// Batch items that have not completed, pending ones included
    pub fn unfinished(&self) -> Vec<&PodTime> {
        self.batch().filter(|item| item.completed.is_none()).collect()
    }

    /// Whether `expected` batch jobs are present and all completed
    pub fn is_complete(&self, expected: usize) -> bool {
        let finished = self.batch().filter(|item| item.completed.is_some()).count();
        finished == expected && self.unfinished().is_empty()
    }

    /// Latest batch completion minus earliest batch start
    pub fn total(&self) -> Option<Duration> {
        let first = self.batch().filter_map(|item| item.started).min()?;
        let last = self.batch().filter_map(|item| item.completed).max()?;
        Some(last - first)
    }
}

fn parse_kube_time(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, KUBE_TIME_FORMAT)
        .map_err(|_| AnalysisError::InvalidTimestamp(s.to_string()))
}
