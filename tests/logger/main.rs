//! Scheduler Logger Integration Tests
//!
//! Tests organized by functionality:
//! - format: exact line layout per event kind
//! - contract: append-only ordering, scheduler markers, reserved-job panics
//! - durability: flush behaviour per mode, file naming, no truncation

mod contract;
mod durability;
mod format;

use schedlog::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A logger writing into its own temporary directory
pub struct TestLog {
    pub dir: TempDir,
    pub logger: SchedulerLogger,
}

impl TestLog {
    pub fn new() -> Self {
        Self::with_mode(DurabilityMode::Flush)
    }

    pub fn with_mode(mode: DurabilityMode) -> Self {
        init_tracing();
        let dir = tempfile::tempdir().expect("tempdir");
        let logger = LoggerOptions::builder()
            .directory(dir.path())
            .durability(mode)
            .open()
            .expect("open logger");
        TestLog { dir, logger }
    }

    pub fn path(&self) -> PathBuf {
        self.logger.path().to_path_buf()
    }

    pub fn lines(&self) -> Vec<String> {
        read_lines(self.logger.path())
    }
}

/// Route logger diagnostics to the test harness output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .try_init();
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read log")
        .lines()
        .map(str::to_string)
        .collect()
}

/// The `<event> <job> <args>` part of a line, without the timestamp
pub fn body(line: &str) -> &str {
    line.split_once(' ').map(|(_, rest)| rest).unwrap_or("")
}
