//! Analysis Integration Tests
//!
//! - replay: logs written by the logger, replayed into timelines
//! - results: pod listings, `time` output and mcperf reports read from disk

mod replay;

use schedlog::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Run `script` against a fresh logger and return the finished log
pub fn record(script: impl FnOnce(&mut SchedulerLogger)) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut logger = LoggerOptions::builder()
        .directory(dir.path())
        .open()
        .expect("open logger");
    script(&mut logger);
    let path = logger.end().expect("end log");
    (dir, path)
}
