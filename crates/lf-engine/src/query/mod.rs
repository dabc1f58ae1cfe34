//! Aggregate queries over a decoded record sequence.
//!
//! Each query is a pure function of the records and its parameters, with a
//! `QueryTool` wrapper that takes JSON arguments.

pub mod frequency;
pub mod rate;
pub mod sum;

pub use frequency::{FrequencyMode, LeastFreq, MostFreq, frequency_mode};
pub use rate::{EventRate, EventsPerSecond, event_rate};
pub use sum::{TotalBytes, conditional_sum};

use crate::error::{LogError, LogResult};
use crate::types::QueryTool;

/// Return all built-in query tools.
pub fn all_tools() -> Vec<Box<dyn QueryTool>> {
    vec![
        Box::new(MostFreq),
        Box::new(LeastFreq),
        Box::new(TotalBytes),
        Box::new(EventsPerSecond),
    ]
}

/// Read a 1-based column argument, accepting a number or a numeric string.
pub(crate) fn column_arg(args: &serde_json::Value, key: &str, default: usize) -> LogResult<usize> {
    match &args[key] {
        serde_json::Value::Null => Ok(default),
        value => parse_column(value)
            .ok_or_else(|| LogError::InvalidArgument(format!("'{key}' must be a column >= 1, got {value}"))),
    }
}

/// Read a list of 1-based columns.
pub(crate) fn columns_arg(
    args: &serde_json::Value,
    key: &str,
    default: &[usize],
) -> LogResult<Vec<usize>> {
    match &args[key] {
        serde_json::Value::Null => Ok(default.to_vec()),
        serde_json::Value::Array(items) => items
            .iter()
            .map(|v| {
                parse_column(v).ok_or_else(|| {
                    LogError::InvalidArgument(format!("'{key}' entries must be columns >= 1, got {v}"))
                })
            })
            .collect(),
        other => Err(LogError::InvalidArgument(format!(
            "'{key}' must be an array of columns, got {other}"
        ))),
    }
}

fn parse_column(value: &serde_json::Value) -> Option<usize> {
    let n = match value {
        serde_json::Value::Number(n) => usize::try_from(n.as_u64()?).ok()?,
        serde_json::Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (n >= 1).then_some(n)
}
