//! mcperf report parsing
//!
//! mcperf prints one header line and one `read` row per measurement
//! interval:
//!
//! ```text
//! #type       avg     std     min      p5     p10     p50     p67     p75     p80     p85     p90     p95     p99    p999   p9999      QPS   target
//! read      512.3    90.1   201.4   350.2   380.0   500.1   540.2   560.3   580.4   600.5   640.6   700.7   900.8  1200.9  1500.0  29950.3  30000
//! ```
//!
//! Dynamic-load runs append `ts_start ts_end` (milliseconds since the epoch).
//! Columns are located through the header when one is present; otherwise the
//! fixed layout above is assumed. Latencies are in microseconds.

use crate::error::{AnalysisError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// 95th percentile column in the fixed layout
const P95_COLUMN: usize = 12;

/// One `read` row
#[derive(Debug, Clone, PartialEq)]
pub struct McperfRow {
    /// Mean latency (us)
    pub avg: f64,
    /// 50th percentile latency (us)
    pub p50: Option<f64>,
    /// 95th percentile latency (us)
    pub p95: f64,
    /// 99th percentile latency (us)
    pub p99: Option<f64>,
    /// Achieved queries per second
    pub qps: f64,
    /// Requested queries per second
    pub target: f64,
    /// Interval start (ms since epoch), dynamic runs only
    pub ts_start: Option<i64>,
    /// Interval end (ms since epoch), dynamic runs only
    pub ts_end: Option<i64>,
}

impl McperfRow {
    /// Whether the p95 latency stays within `slo_us`
    pub fn meets_slo(&self, slo_us: f64) -> bool {
        self.p95 <= slo_us
    }
}

#[derive(Debug, Default)]
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_header(line: &str) -> Self {
        let index = line
            .trim_start_matches('#')
            .split_whitespace()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i))
            .collect();
        Columns { index }
    }

    fn get(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

/// Parsed mcperf output
#[derive(Debug, Clone, Default)]
pub struct McperfReport {
    rows: Vec<McperfRow>,
}

impl McperfReport {
    /// Parse mcperf output text, skipping anything that is not a `read` row
    pub fn parse(text: &str) -> Result<Self> {
        let mut columns: Option<Columns> = None;
        let mut rows = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("#type") {
                columns = Some(Columns::from_header(trimmed));
                continue;
            }
            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields.first() != Some(&"read") {
                continue;
            }
            match parse_row(&fields, columns.as_ref()) {
                Some(row) => rows.push(row),
                None => warn!(line = line_no + 1, "skipping malformed mcperf row"),
            }
        }

        Ok(McperfReport { rows })
    }

    /// Read and parse a saved mcperf output file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Rows in output order
    pub fn rows(&self) -> &[McperfRow] {
        &self.rows
    }

    /// Worst p95 latency over all rows
    pub fn max_p95(&self) -> Option<f64> {
        self.rows.iter().map(|row| row.p95).reduce(f64::max)
    }

    /// Fraction of rows whose p95 exceeds `slo_us`
    pub fn slo_violation_ratio(&self, slo_us: f64) -> Result<f64> {
        if self.rows.is_empty() {
            return Err(AnalysisError::MissingField {
                item: "mcperf report".to_string(),
                field: "read",
            });
        }
        let violating = self.rows.iter().filter(|row| !row.meets_slo(slo_us)).count();
        Ok(violating as f64 / self.rows.len() as f64)
    }
}

fn parse_row(fields: &[&str], columns: Option<&Columns>) -> Option<McperfRow> {
    let number = |i: usize| -> Option<f64> { fields.get(i)?.parse().ok() };
    let named = |name: &str| columns.and_then(|c| c.get(name));

    let (qps_col, target_col) = match (named("QPS"), named("target")) {
        (Some(qps), Some(target)) => (qps, target),
        _ => (fields.len().checked_sub(2)?, fields.len().checked_sub(1)?),
    };

    Some(McperfRow {
        avg: number(named("avg").unwrap_or(1))?,
        p50: named("p50").and_then(number),
        p95: number(named("p95").unwrap_or(P95_COLUMN))?,
        p99: named("p99").and_then(number),
        qps: number(qps_col)?,
        target: number(target_col)?,
        ts_start: named("ts_start").and_then(|i| fields.get(i)?.parse().ok()),
        ts_end: named("ts_end").and_then(|i| fields.get(i)?.parse().ok()),
    })
}
