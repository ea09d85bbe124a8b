//! Logger contract tests
//!
//! - every call appends exactly one line after all earlier lines
//! - `end()` appends exactly one `end scheduler` line
//! - per-job methods refuse the scheduler pseudo-job before writing anything

use crate::*;

#[test]
fn test_each_call_appends_one_line_in_order() {
    let mut log = TestLog::new();
    let mut expected = vec!["start scheduler".to_string()];

    for job in Job::workloads() {
        log.logger.job_start(*job, &["0"], 1).unwrap();
        expected.push(format!("start {} [0] 1", job));
        assert_eq!(log.lines().len(), expected.len());
    }
    for job in Job::workloads() {
        log.logger.job_end(*job).unwrap();
        expected.push(format!("end {}", job));
        assert_eq!(log.lines().len(), expected.len());
    }

    let bodies: Vec<_> = log.lines().iter().map(|l| body(l).to_string()).collect();
    assert_eq!(bodies, expected);
    assert_eq!(log.logger.events_written(), expected.len() as u64);
}

#[test]
fn test_timestamps_never_go_backwards() {
    let mut log = TestLog::new();
    for _ in 0..20 {
        log.logger.custom_event(Job::Radix, "tick").unwrap();
    }
    let events = LogReader::read_all(log.path()).unwrap();
    assert!(events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn test_end_appends_single_scheduler_end() {
    let mut log = TestLog::new();
    log.logger.job_start(Job::Freqmine, &["1"], 1).unwrap();
    log.logger.job_end(Job::Freqmine).unwrap();

    let TestLog { dir, logger } = log;
    let path = logger.end().unwrap();
    assert!(path.starts_with(dir.path()));

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 4);
    assert_eq!(body(&lines[3]), "end scheduler");
    assert_eq!(
        lines.iter().filter(|l| body(l) == "end scheduler").count(),
        1
    );
}

#[test]
fn test_log_reads_back_as_events() {
    let mut log = TestLog::new();
    log.logger.job_start(Job::Memcached, &["0", "1"], 2).unwrap();
    log.logger.custom_event(Job::Memcached, "hello world").unwrap();

    let TestLog { dir: _dir, logger } = log;
    let path = logger.end().unwrap();
    let events = LogReader::read_all(&path).unwrap();

    assert_eq!(events.len(), 4);
    assert!(events[0].is_scheduler_marker());
    assert_eq!(
        events[1].payload,
        EventPayload::Start(Some(CoreAssignment::new(&["0", "1"], 2).unwrap()))
    );
    assert_eq!(events[2].payload, EventPayload::Custom("hello world".into()));
    assert!(events[3].is_scheduler_marker());
}

fn assert_rejects_scheduler(call: impl FnOnce(&mut SchedulerLogger)) {
    let log = TestLog::new();
    let path = log.path();
    let TestLog { dir: _dir, mut logger } = log;

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| call(&mut logger)));
    assert!(result.is_err(), "scheduler job must be rejected");

    drop(logger);
    // only the start record, nothing from the rejected call
    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1);
    assert_eq!(body(&lines[0]), "start scheduler");
}

#[test]
fn test_job_start_rejects_scheduler() {
    assert_rejects_scheduler(|l| {
        let _ = l.job_start(Job::Scheduler, &["0"], 1);
    });
}

#[test]
fn test_job_end_rejects_scheduler() {
    assert_rejects_scheduler(|l| {
        let _ = l.job_end(Job::Scheduler);
    });
}

#[test]
fn test_pause_and_unpause_reject_scheduler() {
    assert_rejects_scheduler(|l| {
        let _ = l.job_pause(Job::Scheduler);
    });
    assert_rejects_scheduler(|l| {
        let _ = l.job_unpause(Job::Scheduler);
    });
}

#[test]
fn test_update_cores_rejects_scheduler() {
    assert_rejects_scheduler(|l| {
        let _ = l.update_cores(Job::Scheduler, &["0"]);
    });
}

#[test]
fn test_custom_event_rejects_scheduler() {
    assert_rejects_scheduler(|l| {
        let _ = l.custom_event(Job::Scheduler, "note");
    });
}

#[test]
fn test_logger_does_not_enforce_lifecycle() {
    let mut log = TestLog::new();
    // pause before start, double end: recorded as-is
    log.logger.job_pause(Job::Vips).unwrap();
    log.logger.job_end(Job::Vips).unwrap();
    log.logger.job_end(Job::Vips).unwrap();
    assert_eq!(log.lines().len(), 4);
}

#[test]
fn test_unwritable_core_ids_keep_log_readable() {
    let mut log = TestLog::new();
    for bad in ["0 1", "0,1", "[2]", ""] {
        let err = schedlog::Error::from(log.logger.job_start(Job::Radix, &[bad], 2).unwrap_err());
        assert!(err.is_malformed_input());
    }
    log.logger.job_start(Job::Radix, &["cpu0", "cpu1"], 2).unwrap();
    log.logger.update_cores(Job::Radix, &[3, 4]).unwrap();

    let events = LogReader::read_all(log.path()).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(
        events[2].payload,
        EventPayload::UpdateCores(vec!["3".into(), "4".into()])
    );
}
