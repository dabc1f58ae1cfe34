//! events_per_second — record count over the span of a timestamp field.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::error::{LogError, LogResult};
use crate::types::{QueryTool, Record, ToolResult};

use super::column_arg;

const DEFAULT_COLUMN: usize = 1;

/// Event rate plus the bounds it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRate {
    /// Records per second.
    pub rate: f64,
    pub record_count: usize,
    /// Smallest timestamp, Unix seconds.
    pub earliest: f64,
    /// Largest timestamp, Unix seconds.
    pub latest: f64,
    pub elapsed_secs: f64,
}

fn parse_timestamp(column: usize, value: &str) -> LogResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| LogError::InvalidTimestamp {
            column,
            value: value.to_string(),
        })
}

/// Records per second between the smallest and largest `field_{column}`.
///
/// The rate divides the total number of records (including those that lack
/// the field) by the elapsed span. Fails with `DegenerateSpan` when every
/// timestamp is equal.
pub fn event_rate(records: &[Record], column: usize) -> LogResult<EventRate> {
    let mut bounds: Option<(f64, f64)> = None;

    for value in records.iter().filter_map(|r| r.get(column)) {
        let t = parse_timestamp(column, value)?;
        bounds = Some(match bounds {
            None => (t, t),
            Some((lo, hi)) => (lo.min(t), hi.max(t)),
        });
    }

    let (earliest, latest) = bounds.ok_or(LogError::EmptyStore { column })?;
    let elapsed_secs = latest - earliest;
    if elapsed_secs == 0.0 {
        return Err(LogError::DegenerateSpan {
            timestamp: earliest,
        });
    }

    let record_count = records.len();
    Ok(EventRate {
        rate: record_count as f64 / elapsed_secs,
        record_count,
        earliest,
        latest,
        elapsed_secs,
    })
}

/// RFC 3339 rendering of a Unix timestamp, if chrono can represent it.
fn to_rfc3339(secs: f64) -> Option<String> {
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::<Utc>::from_timestamp(whole as i64, nanos).map(|dt| dt.to_rfc3339())
}

pub struct EventsPerSecond;

impl QueryTool for EventsPerSecond {
    fn name(&self) -> &str {
        "events_per_second"
    }

    fn description(&self) -> &str {
        "Records per second across the span of a Unix timestamp field"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "column": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "1-based field index holding Unix timestamps (default: 1)",
                    "default": DEFAULT_COLUMN
                }
            }
        })
    }

    fn execute(&self, args: serde_json::Value, records: &[Record]) -> LogResult<ToolResult> {
        let column = column_arg(&args, "column", DEFAULT_COLUMN)?;
        let rate = event_rate(records, column)?;
        let data = json!({
            "column": column,
            "rate": rate.rate,
            "record_count": rate.record_count,
            "elapsed_secs": rate.elapsed_secs,
            "time_range": {
                "earliest": to_rfc3339(rate.earliest),
                "latest": to_rfc3339(rate.latest),
            },
        });
        Ok(ToolResult::new(
            "events_per_second",
            data,
            format!(
                "{} records over {}s: {} events/s",
                rate.record_count, rate.elapsed_secs, rate.rate
            ),
        ))
    }
}
