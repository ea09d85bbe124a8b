//! Benchmark run times from `time` output, stored as CSV rows
//!
//! PARSEC containers run their benchmark under the shell `time` builtin, so
//! the pod log ends with
//!
//! ```text
//! real    1m2.500s
//! user    3m55.120s
//! sys     0m1.004s
//! ```
//!
//! [`ProcessTimes::parse`] extracts those three values in seconds and
//! [`RunRecorder`] appends one `threads,job,real,user,sys` row per run.

use crate::error::{AnalysisError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use schedlog_core::Job;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

static TIMES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"real\s+(\d+)m([\d.]+)s\s+user\s+(\d+)m([\d.]+)s\s+sys\s+(\d+)m([\d.]+)s")
        .expect("static regex")
});

/// Wall-clock, user and system time of one benchmark run, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessTimes {
    /// Elapsed wall-clock seconds
    pub real: f64,
    /// User CPU seconds
    pub user: f64,
    /// System CPU seconds
    pub sys: f64,
}

impl ProcessTimes {
    /// Find the `real/user/sys` block in command output
    pub fn parse(output: &str) -> Result<Self> {
        let caps = TIMES.captures(output).ok_or(AnalysisError::MissingTimes)?;
        let seconds = |minutes: usize, secs: usize| -> Result<f64> {
            let minutes: f64 = caps[minutes]
                .parse::<u64>()
                .map_err(|_| AnalysisError::MissingTimes)? as f64;
            let secs: f64 = caps[secs].parse().map_err(|_| AnalysisError::MissingTimes)?;
            Ok(minutes * 60.0 + secs)
        };
        Ok(ProcessTimes {
            real: seconds(1, 2)?,
            user: seconds(3, 4)?,
            sys: seconds(5, 6)?,
        })
    }

    /// CPU time over wall time; roughly the number of busy cores
    pub fn parallelism(&self) -> f64 {
        if self.real > 0.0 {
            (self.user + self.sys) / self.real
        } else {
            0.0
        }
    }
}

/// One CSV row: a benchmark run at a given thread count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Threads the benchmark was launched with
    pub threads: u32,
    /// Benchmark
    pub job: Job,
    /// Wall-clock seconds
    pub real: f64,
    /// User CPU seconds
    pub user: f64,
    /// System CPU seconds
    pub sys: f64,
}

impl RunRecord {
    /// Build a row from parsed times
    pub fn new(threads: u32, job: Job, times: ProcessTimes) -> Self {
        RunRecord {
            threads,
            job,
            real: times.real,
            user: times.user,
            sys: times.sys,
        }
    }
}

/// Appends [`RunRecord`] rows to a header-less CSV file
#[derive(Debug, Clone)]
pub struct RunRecorder {
    path: PathBuf,
}

impl RunRecorder {
    /// Record into `path`; the file is created on first append
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// CSV file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row
    pub fn append(&self, record: &RunRecord) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    /// Read every row back
    pub fn read(&self) -> Result<Vec<RunRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(File::open(&self.path)?);
        let mut records = Vec::new();
        for record in reader.deserialize() {
            records.push(record?);
        }
        Ok(records)
    }
}
