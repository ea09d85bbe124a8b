//! Per-job timelines rebuilt from a scheduler log
//!
//! The logger writes whatever the scheduler tells it. This module replays a
//! finished log and answers two questions afterwards:
//!
//! 1. Did the scheduler keep the per-job lifecycle contract?
//!
//!    ```text
//!    unstarted → running → {paused ⇄ running} → ended
//!    ```
//!
//!    with `update_cores` and `custom` allowed while running or paused,
//!    the log opening with `start scheduler` and closing with
//!    `end scheduler`, and timestamps never going backwards.
//!
//! 2. How long did each job run, how long was it paused, and which cores did
//!    it use over time?
//!
//! Replay never stops at a violation: the event is recorded as a
//! [`ContractViolation`] and its transition is applied anyway, so one bad
//! line does not hide everything after it.

use crate::error::Result;
use chrono::{Duration, NaiveDateTime};
use schedlog_core::{CoreAssignment, EventKind, EventPayload, Job, LogEvent};
use schedlog_logger::LogReader;
use std::collections::BTreeMap;
use std::path::Path;

// ============================================================================
// Job State
// ============================================================================

/// Lifecycle state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobState {
    /// No start seen yet
    Unstarted,
    /// Started and not paused
    Running,
    /// Paused
    Paused,
    /// Ended
    Ended,
}

impl JobState {
    /// Whether `update_cores` / `custom` are allowed in this state
    pub fn is_live(&self) -> bool {
        matches!(self, JobState::Running | JobState::Paused)
    }

    /// State after a lifecycle event, or `None` if the event is not a legal
    /// transition from this state
    pub fn next(&self, kind: EventKind) -> Option<JobState> {
        match (self, kind) {
            (JobState::Unstarted, EventKind::Start) => Some(JobState::Running),
            (JobState::Running, EventKind::Pause) => Some(JobState::Paused),
            (JobState::Paused, EventKind::Unpause) => Some(JobState::Running),
            (JobState::Running, EventKind::End) => Some(JobState::Ended),
            (state, EventKind::UpdateCores | EventKind::Custom) if state.is_live() => Some(*state),
            _ => None,
        }
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobState::Unstarted => "unstarted",
            JobState::Running => "running",
            JobState::Paused => "paused",
            JobState::Ended => "ended",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Violations
// ============================================================================

/// What went wrong at a given event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Event not allowed in the job's current state
    IllegalTransition {
        /// Job
        job: Job,
        /// Event kind
        kind: EventKind,
        /// State the job was in
        state: JobState,
    },
    /// Job started without a core assignment
    MissingAssignment {
        /// Job
        job: Job,
    },
    /// Event appended after `end scheduler`
    AfterSchedulerEnd {
        /// Job
        job: Job,
        /// Event kind
        kind: EventKind,
    },
    /// Scheduler pseudo-job used for anything but one start and one end
    SchedulerMisuse {
        /// Event kind
        kind: EventKind,
    },
    /// Timestamp earlier than the previous line's
    OutOfOrder {
        /// Previous timestamp
        previous: NaiveDateTime,
        /// This line's timestamp
        timestamp: NaiveDateTime,
    },
    /// First event is not `start scheduler`
    MissingSchedulerStart,
    /// Log does not close with `end scheduler`
    MissingSchedulerEnd,
}

/// A contract violation and where it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractViolation {
    /// 1-based index of the offending event, `None` for whole-log problems
    pub event: Option<usize>,
    /// What went wrong
    pub violation: Violation,
}

impl std::fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(event) = self.event {
            write!(f, "event {}: ", event)?;
        }
        match &self.violation {
            Violation::IllegalTransition { job, kind, state } => {
                write!(f, "{} {} while {}", kind, job, state)
            }
            Violation::MissingAssignment { job } => write!(f, "start {} without cores", job),
            Violation::AfterSchedulerEnd { job, kind } => {
                write!(f, "{} {} after end scheduler", kind, job)
            }
            Violation::SchedulerMisuse { kind } => write!(f, "unexpected {} scheduler", kind),
            Violation::OutOfOrder {
                previous,
                timestamp,
            } => write!(f, "timestamp {} before {}", timestamp, previous),
            Violation::MissingSchedulerStart => f.write_str("log does not open with start scheduler"),
            Violation::MissingSchedulerEnd => f.write_str("log does not close with end scheduler"),
        }
    }
}

/// Result of checking a log against the lifecycle contract
#[derive(Debug, Clone)]
pub struct TimelineVerification {
    /// Whether no violation was found
    pub is_valid: bool,
    /// Number of events checked
    pub events: usize,
    /// Violations in log order
    pub violations: Vec<ContractViolation>,
}

impl TimelineVerification {
    /// First violation, if any
    pub fn first(&self) -> Option<&ContractViolation> {
        self.violations.first()
    }
}

// ============================================================================
// Per-job record
// ============================================================================

/// Everything the log says about one job
#[derive(Debug, Clone)]
pub struct JobRecord {
    /// Job
    pub job: Job,
    /// State after the last event
    pub state: JobState,
    /// First start
    pub started: Option<NaiveDateTime>,
    /// End
    pub ended: Option<NaiveDateTime>,
    /// Initial cores and threads
    pub assignment: Option<CoreAssignment>,
    /// Core sets over time, starting with the initial assignment
    pub core_history: Vec<(NaiveDateTime, Vec<String>)>,
    /// Number of `update_cores` events
    pub core_changes: usize,
    /// Number of pauses
    pub pauses: usize,
    /// Time spent paused in closed pause intervals
    pub paused: Duration,
    /// Custom comments in log order
    pub comments: Vec<(NaiveDateTime, String)>,
    paused_since: Option<NaiveDateTime>,
}

impl JobRecord {
    fn new(job: Job) -> Self {
        JobRecord {
            job,
            state: JobState::Unstarted,
            started: None,
            ended: None,
            assignment: None,
            core_history: Vec::new(),
            core_changes: 0,
            pauses: 0,
            paused: Duration::zero(),
            comments: Vec::new(),
            paused_since: None,
        }
    }

    /// Start to end, if both were logged
    pub fn runtime(&self) -> Option<Duration> {
        Some(self.ended? - self.started?)
    }

    /// Runtime minus paused time
    pub fn active(&self) -> Option<Duration> {
        self.runtime().map(|runtime| runtime - self.paused)
    }

    /// Cores currently (or finally) assigned
    pub fn current_cores(&self) -> Option<&[String]> {
        self.core_history.last().map(|(_, cores)| cores.as_slice())
    }

    fn close_pause(&mut self, at: NaiveDateTime) {
        if let Some(since) = self.paused_since.take() {
            self.paused = self.paused + (at - since);
        }
    }

    fn apply(&mut self, event: &LogEvent) {
        let at = event.timestamp;
        match &event.payload {
            EventPayload::Start(assignment) => {
                if self.started.is_none() {
                    self.started = Some(at);
                }
                if let Some(assignment) = assignment {
                    self.core_history.push((at, assignment.cores.clone()));
                    self.assignment = Some(assignment.clone());
                }
                self.state = JobState::Running;
            }
            EventPayload::Pause => {
                if self.paused_since.is_none() {
                    self.paused_since = Some(at);
                    self.pauses += 1;
                }
                self.state = JobState::Paused;
            }
            EventPayload::Unpause => {
                self.close_pause(at);
                self.state = JobState::Running;
            }
            EventPayload::End => {
                self.close_pause(at);
                self.ended = Some(at);
                self.state = JobState::Ended;
            }
            EventPayload::UpdateCores(cores) => {
                self.core_history.push((at, cores.clone()));
                self.core_changes += 1;
            }
            EventPayload::Custom(comment) => {
                self.comments.push((at, comment.clone()));
            }
        }
    }
}

/// Condensed view of a [`JobRecord`]
#[derive(Debug, Clone, PartialEq)]
pub struct JobSummary {
    /// Job
    pub job: Job,
    /// Final state
    pub state: JobState,
    /// Start to end
    pub runtime: Option<Duration>,
    /// Time paused
    pub paused: Duration,
    /// Runtime minus paused time
    pub active: Option<Duration>,
    /// Initial threads
    pub threads: Option<u32>,
    /// Number of core reassignments after the start
    pub core_changes: usize,
    /// Number of pauses
    pub pauses: usize,
}

// ============================================================================
// Timeline
// ============================================================================

/// Replayed scheduler log
#[derive(Debug, Clone)]
pub struct Timeline {
    scheduler_start: Option<NaiveDateTime>,
    scheduler_end: Option<NaiveDateTime>,
    jobs: BTreeMap<Job, JobRecord>,
    violations: Vec<ContractViolation>,
    events: usize,
}

impl Timeline {
    /// Replay events in log order
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a LogEvent>) -> Self {
        let mut timeline = Timeline {
            scheduler_start: None,
            scheduler_end: None,
            jobs: BTreeMap::new(),
            violations: Vec::new(),
            events: 0,
        };
        let mut previous: Option<NaiveDateTime> = None;

        for event in events {
            timeline.events += 1;
            let index = timeline.events;

            if let Some(prev) = previous {
                if event.timestamp < prev {
                    timeline.violate(
                        Some(index),
                        Violation::OutOfOrder {
                            previous: prev,
                            timestamp: event.timestamp,
                        },
                    );
                }
            }
            previous = Some(event.timestamp);

            if index == 1 && !matches!(event.payload, EventPayload::Start(None) if event.job.is_scheduler())
            {
                timeline.violate(None, Violation::MissingSchedulerStart);
            }

            if timeline.scheduler_end.is_some() {
                timeline.violate(
                    Some(index),
                    Violation::AfterSchedulerEnd {
                        job: event.job,
                        kind: event.kind(),
                    },
                );
            }

            if event.job.is_scheduler() {
                timeline.apply_scheduler(index, event);
            } else {
                timeline.apply_job(index, event);
            }
        }

        if timeline.scheduler_end.is_none() {
            timeline.violate(None, Violation::MissingSchedulerEnd);
        }
        timeline
    }

    /// Read and replay a log file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let events = LogReader::read_all(path)?;
        Ok(Self::from_events(&events))
    }

    fn violate(&mut self, event: Option<usize>, violation: Violation) {
        self.violations.push(ContractViolation { event, violation });
    }

    fn apply_scheduler(&mut self, index: usize, event: &LogEvent) {
        match event.payload {
            EventPayload::Start(None) if self.scheduler_start.is_none() => {
                self.scheduler_start = Some(event.timestamp);
            }
            EventPayload::End if self.scheduler_end.is_none() => {
                self.scheduler_end = Some(event.timestamp);
            }
            _ => self.violate(Some(index), Violation::SchedulerMisuse { kind: event.kind() }),
        }
    }

    fn apply_job(&mut self, index: usize, event: &LogEvent) {
        let kind = event.kind();
        let record = self
            .jobs
            .entry(event.job)
            .or_insert_with(|| JobRecord::new(event.job));
        let state = record.state;
        record.apply(event);

        if state.next(kind).is_none() {
            self.violate(
                Some(index),
                Violation::IllegalTransition {
                    job: event.job,
                    kind,
                    state,
                },
            );
        }
        if matches!(event.payload, EventPayload::Start(None)) {
            self.violate(Some(index), Violation::MissingAssignment { job: event.job });
        }
    }

    /// Check the replayed log against the lifecycle contract
    pub fn verify(&self) -> TimelineVerification {
        TimelineVerification {
            is_valid: self.violations.is_empty(),
            events: self.events,
            violations: self.violations.clone(),
        }
    }

    /// Record for one job, if it appears in the log
    pub fn job(&self, job: Job) -> Option<&JobRecord> {
        self.jobs.get(&job)
    }

    /// All jobs that appear in the log
    pub fn jobs(&self) -> impl Iterator<Item = &JobRecord> {
        self.jobs.values()
    }

    /// Summary for one job
    pub fn job_summary(&self, job: Job) -> Option<JobSummary> {
        let record = self.jobs.get(&job)?;
        Some(JobSummary {
            job,
            state: record.state,
            runtime: record.runtime(),
            paused: record.paused,
            active: record.active(),
            threads: record.assignment.as_ref().map(|a| a.threads),
            core_changes: record.core_changes,
            pauses: record.pauses,
        })
    }

    /// Summaries for every job in the log
    pub fn summaries(&self) -> Vec<JobSummary> {
        self.jobs
            .keys()
            .filter_map(|job| self.job_summary(*job))
            .collect()
    }

    /// First batch-job start to last batch-job end
    ///
    /// `None` until every started batch job has ended.
    pub fn makespan(&self) -> Option<Duration> {
        let batch: Vec<_> = self.jobs.values().filter(|r| r.job.is_batch()).collect();
        let first = batch.iter().filter_map(|r| r.started).min()?;
        if batch.iter().any(|r| r.started.is_some() && r.ended.is_none()) {
            return None;
        }
        let last = batch.iter().filter_map(|r| r.ended).max()?;
        Some(last - first)
    }

    /// `start scheduler` to `end scheduler`
    pub fn scheduler_span(&self) -> Option<Duration> {
        Some(self.scheduler_end? - self.scheduler_start?)
    }

    /// Number of events replayed
    pub fn event_count(&self) -> usize {
        self.events
    }
}
