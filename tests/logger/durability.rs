//! Durability and file management tests

use crate::*;

#[test]
fn test_file_name_is_start_timestamp() {
    let log = TestLog::new();
    let name = log.logger.file_name();

    let stamp = name
        .strip_prefix("log")
        .and_then(|rest| rest.strip_suffix(".txt"))
        .expect("log<stamp>.txt");
    assert_eq!(stamp.len(), "YYYYMMDD_HHMMSS".len());
    assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y%m%d_%H%M%S").is_ok());
    assert_eq!(log.path().parent().unwrap(), log.dir.path());
}

#[test]
fn test_flush_mode_lines_visible_immediately() {
    let mut log = TestLog::with_mode(DurabilityMode::Flush);
    log.logger.job_start(Job::Radix, &["0"], 1).unwrap();
    assert_eq!(log.lines().len(), 2);
}

#[test]
fn test_strict_mode_lines_visible_immediately() {
    let mut log = TestLog::with_mode(DurabilityMode::Strict);
    log.logger.job_start(Job::Radix, &["0"], 1).unwrap();
    log.logger.job_end(Job::Radix).unwrap();
    assert_eq!(log.lines().len(), 3);
}

#[test]
fn test_buffered_mode_flushes_on_end() {
    let mut log = TestLog::with_mode(DurabilityMode::Buffered);
    log.logger.job_start(Job::Radix, &["0"], 1).unwrap();
    assert!(log.lines().is_empty());

    let TestLog { dir: _dir, logger } = log;
    let path = logger.end().unwrap();
    assert_eq!(read_lines(&path).len(), 3);
}

#[test]
fn test_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("results").join("exp1");

    let logger = LoggerOptions::builder().directory(&nested).open().unwrap();
    assert!(nested.is_dir());
    let path = logger.end().unwrap();
    assert!(path.starts_with(&nested));
}

#[test]
fn test_existing_log_is_never_truncated() {
    let dir = tempfile::tempdir().unwrap();
    let first = LoggerOptions::builder()
        .directory(dir.path())
        .file_name("sched.txt")
        .open()
        .unwrap();
    let first_path = first.end().unwrap();

    let err = LoggerOptions::builder()
        .directory(dir.path())
        .file_name("sched.txt")
        .open()
        .unwrap_err();
    let err = schedlog::Error::from(err);
    assert!(err.is_already_exists());
    assert_eq!(read_lines(&first_path).len(), 2);
}
