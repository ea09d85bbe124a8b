//! Append-only scheduler event logger
//!
//! A [`SchedulerLogger`] owns one log file for one scheduler run. Creating it
//! writes `start scheduler`; [`SchedulerLogger::end`] writes `end scheduler`,
//! flushes, and closes the file. Every call in between appends exactly one
//! line.
//!
//! The logger records; it does not judge. A job may be paused twice or
//! resized after it ended and the logger will write it down. The only check
//! is that the reserved [`Job::Scheduler`] never goes through a per-job
//! method, which panics before anything is written.

use crate::durability::DurabilityMode;
use crate::error::{LoggerError, Result};
use crate::options::LoggerOptions;
use chrono::{Local, NaiveDateTime};
use schedlog_core::{core_ids, CoreAssignment, EventPayload, Job, LogEvent};
use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Writer for one scheduler run's event log
///
/// # Example
///
/// ```ignore
/// let mut logger = SchedulerLogger::new()?;
/// logger.job_start(Job::Memcached, &["0"], 2)?;
/// logger.job_start(Job::Blackscholes, &["1", "2"], 2)?;
/// logger.job_pause(Job::Blackscholes)?;
/// logger.update_cores(Job::Memcached, &["0", "1"])?;
/// logger.job_unpause(Job::Blackscholes)?;
/// logger.custom_event(Job::Memcached, "p95 above 1ms")?;
/// logger.job_end(Job::Blackscholes)?;
/// logger.job_end(Job::Memcached)?;
/// logger.end()?;
/// ```
#[derive(Debug)]
pub struct SchedulerLogger {
    path: PathBuf,
    writer: BufWriter<File>,
    durability: DurabilityMode,
    events_written: u64,
    ended: bool,
}

impl SchedulerLogger {
    /// Start a log in the current directory with default settings.
    pub fn new() -> Result<Self> {
        Self::open(LoggerOptions::default())
    }

    /// Start a log with the given options.
    ///
    /// Creates the directory if needed, creates the file (never truncating an
    /// existing one) and writes the `start scheduler` record.
    pub fn open(options: LoggerOptions) -> Result<Self> {
        Self::open_at(options, now())
    }

    fn open_at(options: LoggerOptions, started: NaiveDateTime) -> Result<Self> {
        let path = options.log_path(started);
        fs::create_dir_all(&options.directory)?;

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists if options.file_name.is_none() => {
                    LoggerError::RunClash(path.clone())
                }
                io::ErrorKind::AlreadyExists => LoggerError::AlreadyExists(path.clone()),
                _ => LoggerError::Io(e),
            })?;

        info!(
            path = %path.display(),
            durability = options.durability.description(),
            "scheduler log opened"
        );

        let mut logger = SchedulerLogger {
            path,
            writer: BufWriter::new(file),
            durability: options.durability,
            events_written: 0,
            ended: false,
        };
        logger.append(Job::Scheduler, EventPayload::Start(None))?;
        Ok(logger)
    }

    /// Record a job's initial cores and thread count.
    ///
    /// Returns [`LoggerError::InvalidCores`] without writing anything if a
    /// core id is empty or contains whitespace, `,`, `[` or `]`.
    ///
    /// # Panics
    ///
    /// Panics if `job` is [`Job::Scheduler`].
    #[track_caller]
    pub fn job_start<C: Display>(
        &mut self,
        job: Job,
        initial_cores: &[C],
        initial_threads: u32,
    ) -> Result<()> {
        assert_workload(job);
        let assignment = CoreAssignment::new(initial_cores, initial_threads)?;
        self.append(job, EventPayload::Start(Some(assignment)))
    }

    /// Record that a job finished.
    ///
    /// # Panics
    ///
    /// Panics if `job` is [`Job::Scheduler`].
    #[track_caller]
    pub fn job_end(&mut self, job: Job) -> Result<()> {
        assert_workload(job);
        self.append(job, EventPayload::End)
    }

    /// Record that a job was paused.
    ///
    /// # Panics
    ///
    /// Panics if `job` is [`Job::Scheduler`].
    #[track_caller]
    pub fn job_pause(&mut self, job: Job) -> Result<()> {
        assert_workload(job);
        self.append(job, EventPayload::Pause)
    }

    /// Record that a paused job resumed.
    ///
    /// # Panics
    ///
    /// Panics if `job` is [`Job::Scheduler`].
    #[track_caller]
    pub fn job_unpause(&mut self, job: Job) -> Result<()> {
        assert_workload(job);
        self.append(job, EventPayload::Unpause)
    }

    /// Record a new core set for a running job.
    ///
    /// Core ids are checked as in [`SchedulerLogger::job_start`].
    ///
    /// # Panics
    ///
    /// Panics if `job` is [`Job::Scheduler`].
    #[track_caller]
    pub fn update_cores<C: Display>(&mut self, job: Job, cores: &[C]) -> Result<()> {
        assert_workload(job);
        let cores = core_ids(cores)?;
        self.append(job, EventPayload::UpdateCores(cores))
    }

    /// Record a free-text annotation for a job.
    ///
    /// The comment is percent-encoded on the way out, so it may contain
    /// spaces and any other characters.
    ///
    /// # Panics
    ///
    /// Panics if `job` is [`Job::Scheduler`].
    #[track_caller]
    pub fn custom_event(&mut self, job: Job, comment: &str) -> Result<()> {
        assert_workload(job);
        self.append(job, EventPayload::Custom(comment.to_string()))
    }

    /// Write `end scheduler`, flush, and close the log.
    ///
    /// Returns the path of the finished log.
    pub fn end(mut self) -> Result<PathBuf> {
        self.append(Job::Scheduler, EventPayload::End)?;
        self.writer.flush()?;
        if self.durability.syncs_each_event() {
            self.writer.get_ref().sync_all()?;
        }
        self.ended = true;
        info!(
            path = %self.path.display(),
            events = self.events_written,
            "scheduler log closed"
        );
        Ok(self.path.clone())
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the log, e.g. `log20250514_090307.txt`
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Lines appended so far, including `start scheduler`
    pub fn events_written(&self) -> u64 {
        self.events_written
    }

    /// Durability mode in effect
    pub fn durability(&self) -> DurabilityMode {
        self.durability
    }

    fn append(&mut self, job: Job, payload: EventPayload) -> Result<()> {
        let event = LogEvent::new(now(), job, payload);
        writeln!(self.writer, "{}", event.to_line())?;

        if self.durability.flushes_each_event() {
            self.writer.flush()?;
        }
        if self.durability.syncs_each_event() {
            self.writer.get_ref().sync_data()?;
        }

        self.events_written += 1;
        debug!(job = %job, kind = %event.kind(), "event recorded");
        Ok(())
    }
}

impl Drop for SchedulerLogger {
    fn drop(&mut self) {
        if self.ended {
            return;
        }
        warn!(
            path = %self.path.display(),
            "scheduler log dropped without end(); no end record written"
        );
        if let Err(e) = self.writer.flush() {
            warn!(error = %e, "failed to flush scheduler log on drop");
        }
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[track_caller]
fn assert_workload(job: Job) {
    assert_ne!(
        job,
        Job::Scheduler,
        "the scheduler pseudo-job cannot be logged through a per-job method"
    );
}
