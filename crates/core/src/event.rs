//! Log events and their line format
//!
//! Every event occupies exactly one line of a log file:
//!
//! ```text
//! <timestamp> <event_kind> <job_name> <args>
//! ```
//!
//! The trailing space is dropped when `args` is empty. `args` depends on the
//! event kind:
//!
//! | Kind | Args |
//! |------|------|
//! | start (job) | `[c1,c2,...] <threads>` |
//! | start / end (scheduler) | empty |
//! | update_cores | `[c1,c2,...]` |
//! | custom | encoded comment, see [`crate::encoding`] |
//! | end, pause, unpause | empty |

use crate::encoding::{decode_comment, encode_comment};
use crate::error::{CoreError, Result};
use crate::job::Job;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Timestamp layout written to log lines (local time, microseconds)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Kind of a log event, as written in the second field of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Job (or scheduler) started
    Start,
    /// Job (or scheduler) finished
    End,
    /// Job paused
    Pause,
    /// Job resumed
    Unpause,
    /// Job moved to a new set of cores
    UpdateCores,
    /// Free-text annotation
    Custom,
}

impl EventKind {
    /// All event kinds
    pub const ALL: [EventKind; 6] = [
        EventKind::Start,
        EventKind::End,
        EventKind::Pause,
        EventKind::Unpause,
        EventKind::UpdateCores,
        EventKind::Custom,
    ];

    /// Identifier used in log lines
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::End => "end",
            EventKind::Pause => "pause",
            EventKind::Unpause => "unpause",
            EventKind::UpdateCores => "update_cores",
            EventKind::Custom => "custom",
        }
    }
}

impl FromStr for EventKind {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        EventKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownEventKind(s.to_string()))
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Initial placement of a job: the cores it may run on and its thread count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreAssignment {
    /// Core identifiers, in the order the scheduler gave them
    pub cores: Vec<String>,
    /// Number of worker threads the job was launched with
    pub threads: u32,
}

impl CoreAssignment {
    /// Create an assignment from anything printable as a core id
    ///
    /// Fails with [`CoreError::InvalidCoreId`] if a rendered id could not be
    /// read back from a log line.
    pub fn new<C: Display>(cores: &[C], threads: u32) -> Result<Self> {
        Ok(Self {
            cores: core_ids(cores)?,
            threads,
        })
    }
}

/// Typed arguments of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    /// Start marker. `None` for the scheduler's own start line.
    Start(Option<CoreAssignment>),
    /// End marker
    End,
    /// Job paused
    Pause,
    /// Job resumed
    Unpause,
    /// New core set for a running job
    UpdateCores(Vec<String>),
    /// Decoded free-text comment
    Custom(String),
}

impl EventPayload {
    /// Event kind of this payload
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::Start(_) => EventKind::Start,
            EventPayload::End => EventKind::End,
            EventPayload::Pause => EventKind::Pause,
            EventPayload::Unpause => EventKind::Unpause,
            EventPayload::UpdateCores(_) => EventKind::UpdateCores,
            EventPayload::Custom(_) => EventKind::Custom,
        }
    }

    /// Render the `args` field of a line
    pub fn args(&self) -> String {
        match self {
            EventPayload::Start(Some(assignment)) => {
                format!("{} {}", format_cores(&assignment.cores), assignment.threads)
            }
            EventPayload::UpdateCores(cores) => format_cores(cores),
            EventPayload::Custom(comment) => encode_comment(comment),
            EventPayload::Start(None)
            | EventPayload::End
            | EventPayload::Pause
            | EventPayload::Unpause => String::new(),
        }
    }

    fn parse(kind: EventKind, args: Option<&str>) -> Result<Self> {
        match kind {
            EventKind::Start => match args {
                None => Ok(EventPayload::Start(None)),
                Some(args) => {
                    let (cores, threads) = args
                        .split_once(' ')
                        .ok_or_else(|| CoreError::malformed("start needs cores and threads"))?;
                    let threads = threads.parse::<u32>().map_err(|_| {
                        CoreError::malformed(format!("invalid thread count: {}", threads))
                    })?;
                    Ok(EventPayload::Start(Some(CoreAssignment {
                        cores: parse_cores(cores)?,
                        threads,
                    })))
                }
            },
            EventKind::UpdateCores => {
                let args =
                    args.ok_or_else(|| CoreError::malformed("update_cores needs a core list"))?;
                Ok(EventPayload::UpdateCores(parse_cores(args)?))
            }
            EventKind::Custom => Ok(EventPayload::Custom(decode_comment(args.unwrap_or(""))?)),
            EventKind::End | EventKind::Pause | EventKind::Unpause => match args {
                None => Ok(match kind {
                    EventKind::End => EventPayload::End,
                    EventKind::Pause => EventPayload::Pause,
                    _ => EventPayload::Unpause,
                }),
                Some(extra) => Err(CoreError::malformed(format!(
                    "{} takes no arguments, got {:?}",
                    kind, extra
                ))),
            },
        }
    }
}

/// One line of a scheduler log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Local wall-clock time at which the line was formatted
    pub timestamp: NaiveDateTime,
    /// Job the event refers to
    pub job: Job,
    /// What happened
    pub payload: EventPayload,
}

impl LogEvent {
    /// Create an event
    pub fn new(timestamp: NaiveDateTime, job: Job, payload: EventPayload) -> Self {
        Self {
            timestamp,
            job,
            payload,
        }
    }

    /// Event kind
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// Whether this is the scheduler's own start or end marker
    pub fn is_scheduler_marker(&self) -> bool {
        self.job.is_scheduler()
            && matches!(self.payload, EventPayload::Start(None) | EventPayload::End)
    }

    /// Render the event as a log line, without the trailing newline
    pub fn to_line(&self) -> String {
        let line = format!(
            "{} {} {} {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.kind(),
            self.job,
            self.payload.args()
        );
        line.trim().to_string()
    }

    /// Parse a single log line (trailing newline allowed)
    pub fn parse_line(line: &str) -> Result<Self> {
        let line = line.trim();
        let mut fields = line.splitn(4, ' ');

        let timestamp = fields
            .next()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| CoreError::malformed("empty line"))?;
        let kind = fields
            .next()
            .ok_or_else(|| CoreError::malformed("missing event kind"))?;
        let job = fields
            .next()
            .ok_or_else(|| CoreError::malformed("missing job name"))?;
        let args = fields.next().map(str::trim).filter(|a| !a.is_empty());

        let timestamp = parse_timestamp(timestamp)?;
        let kind = kind.parse::<EventKind>()?;
        let job = job.parse::<Job>()?;
        let payload = EventPayload::parse(kind, args)?;

        Ok(LogEvent::new(timestamp, job, payload))
    }
}

impl std::fmt::Display for LogEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// Parse an ISO-8601 local timestamp, with or without fractional seconds
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    s.parse::<NaiveDateTime>()
        .map_err(|_| CoreError::InvalidTimestamp(s.to_string()))
}

/// Render core ids as strings, rejecting any the line format cannot carry
pub fn core_ids<C: Display>(cores: &[C]) -> Result<Vec<String>> {
    cores
        .iter()
        .map(|core| {
            let id = core.to_string();
            check_core_id(&id)?;
            Ok(id)
        })
        .collect()
}

fn check_core_id(id: &str) -> Result<()> {
    let reserved = |c: char| c.is_whitespace() || matches!(c, ',' | '[' | ']');
    if id.is_empty() || id.contains(reserved) {
        return Err(CoreError::InvalidCoreId(id.to_string()));
    }
    Ok(())
}

/// Render a core list as `[c1,c2,...]`
pub fn format_cores<C: Display>(cores: &[C]) -> String {
    let joined = cores
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("[{}]", joined)
}

fn parse_cores(s: &str) -> Result<Vec<String>> {
    let inner = s
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| CoreError::malformed(format!("core list must be bracketed: {}", s)))?;
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(|id| {
            check_core_id(id)?;
            Ok(id.to_string())
        })
        .collect()
}
