//! Line layout tests
//!
//! Each logging call must produce `<timestamp> <event> <job> <args>` with the
//! args encoding of its event kind.

use crate::*;
use chrono::NaiveDateTime;

#[test]
fn test_job_start_args() {
    let mut log = TestLog::new();
    log.logger.job_start(Job::Blackscholes, &["0", "1"], 2).unwrap();

    let lines = log.lines();
    assert!(lines[1].ends_with("[0,1] 2"));
    assert_eq!(body(&lines[1]), "start blackscholes [0,1] 2");
}

#[test]
fn test_job_start_accepts_numeric_cores() {
    let mut log = TestLog::new();
    log.logger.job_start(Job::Canneal, &[2u32, 3], 4).unwrap();
    assert_eq!(body(&log.lines()[1]), "start canneal [2,3] 4");
}

#[test]
fn test_update_cores_args() {
    let mut log = TestLog::new();
    log.logger.job_start(Job::Memcached, &["0"], 2).unwrap();
    log.logger.update_cores(Job::Memcached, &["2", "3"]).unwrap();

    let lines = log.lines();
    assert!(lines[2].ends_with("[2,3]"));
    assert_eq!(body(&lines[2]), "update_cores memcached [2,3]");
}

#[test]
fn test_custom_event_is_form_encoded() {
    let mut log = TestLog::new();
    log.logger.custom_event(Job::Ferret, "hello world").unwrap();
    log.logger.custom_event(Job::Ferret, "qps=30k & p95<1ms").unwrap();

    let lines = log.lines();
    assert_eq!(body(&lines[1]), "custom ferret hello+world");
    assert_eq!(body(&lines[2]), "custom ferret qps%3D30k+%26+p95%3C1ms");
}

#[test]
fn test_zero_argument_events() {
    let mut log = TestLog::new();
    log.logger.job_pause(Job::Dedup).unwrap();
    log.logger.job_unpause(Job::Dedup).unwrap();
    log.logger.job_end(Job::Dedup).unwrap();

    let bodies: Vec<_> = log.lines().iter().map(|l| body(l).to_string()).collect();
    assert_eq!(
        bodies,
        vec!["start scheduler", "pause dedup", "unpause dedup", "end dedup"]
    );
}

#[test]
fn test_timestamps_are_iso8601() {
    let mut log = TestLog::new();
    log.logger.job_end(Job::Vips).unwrap();

    for line in log.lines() {
        let (timestamp, _) = line.split_once(' ').unwrap();
        assert!(
            timestamp.parse::<NaiveDateTime>().is_ok(),
            "not ISO-8601: {}",
            timestamp
        );
        assert!(timestamp.contains('T'));
    }
}
