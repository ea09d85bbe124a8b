//! Logger output replayed into timelines

use crate::*;
use schedlog::analysis::{JobState, Violation};
use std::fs;
use std::io::Write;

#[test]
fn test_well_behaved_run_verifies() {
    let (_dir, path) = record(|log| {
        log.job_start(Job::Memcached, &["0"], 2).unwrap();
        log.job_start(Job::Blackscholes, &["1", "2"], 2).unwrap();
        log.job_pause(Job::Blackscholes).unwrap();
        log.update_cores(Job::Memcached, &["0", "1"]).unwrap();
        log.job_unpause(Job::Blackscholes).unwrap();
        log.custom_event(Job::Memcached, "p95 above 1ms").unwrap();
        log.job_end(Job::Blackscholes).unwrap();
        log.job_end(Job::Memcached).unwrap();
    });

    let timeline = Timeline::from_path(&path).unwrap();
    let verification = timeline.verify();
    assert!(verification.is_valid, "{:?}", verification.violations);
    assert_eq!(timeline.event_count(), 10);

    let memcached = timeline.job(Job::Memcached).unwrap();
    assert_eq!(memcached.state, JobState::Ended);
    assert_eq!(memcached.current_cores().unwrap(), ["0", "1"]);
    assert_eq!(memcached.comments[0].1, "p95 above 1ms");

    let blackscholes = timeline.job(Job::Blackscholes).unwrap();
    assert_eq!(blackscholes.pauses, 1);
    assert!(blackscholes.runtime().is_some());

    assert!(timeline.makespan().is_some());
    assert!(timeline.scheduler_span().unwrap() >= timeline.makespan().unwrap());
}

#[test]
fn test_logger_records_contract_breaks_that_replay_reports() {
    let (_dir, path) = record(|log| {
        log.job_start(Job::Canneal, &["3"], 1).unwrap();
        log.job_end(Job::Canneal).unwrap();
        log.job_pause(Job::Canneal).unwrap();
    });

    let verification = Timeline::from_path(&path).unwrap().verify();
    assert!(!verification.is_valid);
    assert_eq!(verification.violations.len(), 1);

    let first = verification.first().unwrap();
    assert_eq!(first.event, Some(4));
    assert_eq!(
        first.violation,
        Violation::IllegalTransition {
            job: Job::Canneal,
            kind: EventKind::Pause,
            state: JobState::Ended,
        }
    );
}

#[test]
fn test_unfinished_batch_job_leaves_makespan_open() {
    let (_dir, path) = record(|log| {
        log.job_start(Job::Dedup, &["1"], 1).unwrap();
        log.job_start(Job::Radix, &["2"], 1).unwrap();
        log.job_end(Job::Dedup).unwrap();
    });

    let timeline = Timeline::from_path(&path).unwrap();
    assert_eq!(timeline.makespan(), None);
    assert_eq!(timeline.job(Job::Radix).unwrap().state, JobState::Running);
}

#[test]
fn test_summaries_cover_every_started_job() {
    let (_dir, path) = record(|log| {
        for (i, job) in Job::workloads().iter().enumerate() {
            log.job_start(*job, &[i], 1).unwrap();
        }
        for job in Job::workloads() {
            log.job_end(*job).unwrap();
        }
    });

    let timeline = Timeline::from_path(&path).unwrap();
    let summaries = timeline.summaries();
    assert_eq!(summaries.len(), Job::workloads().len());
    assert!(summaries.iter().all(|s| s.state == JobState::Ended));
    assert!(summaries.iter().all(|s| s.threads == Some(1)));
}

#[test]
fn test_corrupt_line_is_reported_with_line_number() {
    let (_dir, path) = record(|log| {
        log.job_start(Job::Vips, &["0"], 1).unwrap();
    });
    let mut file = fs::OpenOptions::new().append(true).open(&path).unwrap();
    writeln!(file, "2025-05-14T10:00:00.000000 start barnes [0] 1").unwrap();

    let err = schedlog::Error::from(Timeline::from_path(&path).unwrap_err());
    assert!(err.is_malformed_input());
}

#[test]
fn test_latest_log_in_results_directory() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["log20250514_090000.txt", "log20250514_100000.txt"] {
        let mut logger = LoggerOptions::builder()
            .directory(dir.path())
            .file_name(name)
            .open()
            .unwrap();
        logger.job_start(Job::Ferret, &["0"], 1).unwrap();
        logger.end().unwrap();
    }

    let latest = schedlog::logger::latest_log(dir.path()).unwrap();
    assert!(latest.ends_with("log20250514_100000.txt"));
    assert_eq!(schedlog::logger::find_logs(dir.path()).unwrap().len(), 2);
}
