//! Reading scheduler logs back
//!
//! [`LogReader`] streams a log file line by line and decodes each line into a
//! [`LogEvent`]. Blank lines are skipped; any other line that fails to decode
//! is reported with its 1-based line number.

use crate::error::{LoggerError, Result};
use crate::options::{LOG_FILE_EXTENSION, LOG_FILE_PREFIX};
use schedlog_core::LogEvent;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::{Path, PathBuf};

/// Streaming decoder over the lines of a log
pub struct LogReader<R> {
    lines: Lines<BufReader<R>>,
    line_no: usize,
}

impl LogReader<File> {
    /// Open a log file for reading
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }

    /// Read and decode a whole log file, stopping at the first bad line
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<LogEvent>> {
        Self::open(path)?.collect()
    }
}

impl<R: Read> LogReader<R> {
    /// Decode events from any byte source
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            line_no: 0,
        }
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_no
    }
}

impl<R: Read> Iterator for LogReader<R> {
    type Item = Result<LogEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(LoggerError::Io(e))),
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(LogEvent::parse_line(&line).map_err(|source| LoggerError::Parse {
                line: self.line_no,
                source,
            }));
        }
    }
}

/// List the `log*.txt` files in `dir`, oldest first
///
/// Generated names embed the start time as `YYYYMMDD_HHMMSS`, so name order
/// is chronological order.
pub fn find_logs(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut logs = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        let is_log = path.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| {
                    name.starts_with(LOG_FILE_PREFIX)
                        && name.ends_with(&format!(".{}", LOG_FILE_EXTENSION))
                })
                .unwrap_or(false);
        if is_log {
            logs.push(path);
        }
    }
    logs.sort();
    Ok(logs)
}

/// Most recent log in `dir`
pub fn latest_log(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    find_logs(dir)?
        .pop()
        .ok_or_else(|| LoggerError::NoLogs(dir.to_path_buf()))
}
