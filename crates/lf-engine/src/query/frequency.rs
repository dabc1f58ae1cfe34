//! most_freq / least_freq — values tied for the extreme count of a field.

use std::collections::HashMap;

use serde_json::json;

use crate::error::{LogError, LogResult};
use crate::types::{QueryTool, Record, ToolResult};

use super::column_arg;

const DEFAULT_COLUMN: usize = 3;

/// Every value sharing the extreme occurrence count, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyMode {
    pub values: Vec<String>,
    pub count: usize,
}

/// Count the values of `field_{column}` and return those tied for the
/// highest count, or the lowest when `reverse` is set.
///
/// Records without the field are ignored. Among equal counts values keep
/// the order in which they were first seen.
pub fn frequency_mode(records: &[Record], column: usize, reverse: bool) -> LogResult<FrequencyMode> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for value in records.iter().filter_map(|r| r.get(column)) {
        match slot.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slot.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    // Stable sort, so first-seen order survives among ties.
    if reverse {
        counts.sort_by_key(|&(_, n)| n);
    } else {
        counts.sort_by_key(|&(_, n)| std::cmp::Reverse(n));
    }

    let Some(&(_, count)) = counts.first() else {
        return Err(LogError::EmptyStore { column });
    };

    let values = counts
        .iter()
        .take_while(|&&(_, n)| n == count)
        .map(|&(v, _)| v.to_string())
        .collect();

    Ok(FrequencyMode { values, count })
}

fn schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "column": {
                "type": "integer",
                "minimum": 1,
                "description": "1-based field index to count (default: 3)",
                "default": DEFAULT_COLUMN
            }
        }
    })
}

fn run(name: &str, args: &serde_json::Value, records: &[Record], reverse: bool) -> LogResult<ToolResult> {
    let column = column_arg(args, "column", DEFAULT_COLUMN)?;
    let mode = frequency_mode(records, column, reverse)?;
    let summary = format!(
        "{} value(s) of field_{column} seen {} time(s)",
        mode.values.len(),
        mode.count
    );
    let data = json!({
        "column": column,
        "values": mode.values,
        "count": mode.count,
    });
    Ok(ToolResult::new(name, data, summary))
}

/// Most common value(s) of a field.
pub struct MostFreq;

impl QueryTool for MostFreq {
    fn name(&self) -> &str {
        "most_freq"
    }

    fn description(&self) -> &str {
        "Most frequent value(s) of a field, with ties"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        schema()
    }

    fn execute(&self, args: serde_json::Value, records: &[Record]) -> LogResult<ToolResult> {
        run(self.name(), &args, records, false)
    }
}

/// Least common value(s) of a field.
pub struct LeastFreq;

impl QueryTool for LeastFreq {
    fn name(&self) -> &str {
        "least_freq"
    }

    fn description(&self) -> &str {
        "Least frequent value(s) of a field, with ties"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        schema()
    }

    fn execute(&self, args: serde_json::Value, records: &[Record]) -> LogResult<ToolResult> {
        run(self.name(), &args, records, true)
    }
}
