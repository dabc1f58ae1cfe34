//! total_bytes — sum the all-digit values of a set of fields.

use serde_json::json;

use crate::error::{LogError, LogResult};
use crate::types::{QueryTool, Record, ToolResult};

use super::columns_arg;

const DEFAULT_COLUMNS: [usize; 2] = [2, 5];

/// True if `value` is one or more ASCII digits.
fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Sum `field_{c}` for every record and every column `c` in `columns`.
///
/// Absent fields and values that are not plain digits contribute zero.
/// An empty record sequence sums to zero.
pub fn conditional_sum(records: &[Record], columns: &[usize]) -> LogResult<u64> {
    let mut total: u64 = 0;
    for record in records {
        for value in columns.iter().filter_map(|&c| record.get(c)) {
            if !is_digits(value) {
                continue;
            }
            let n: u64 = value
                .parse()
                .map_err(|_| LogError::Overflow(format!("{value} does not fit in 64 bits")))?;
            total = total
                .checked_add(n)
                .ok_or_else(|| LogError::Overflow("sum exceeds 64 bits".into()))?;
        }
    }
    Ok(total)
}

pub struct TotalBytes;

impl QueryTool for TotalBytes {
    fn name(&self) -> &str {
        "total_bytes"
    }

    fn description(&self) -> &str {
        "Sum the numeric values of the given fields across all records"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "columns": {
                    "type": "array",
                    "items": { "type": "integer", "minimum": 1 },
                    "description": "1-based field indices to sum (default: [2, 5])",
                    "default": DEFAULT_COLUMNS
                }
            }
        })
    }

    fn execute(&self, args: serde_json::Value, records: &[Record]) -> LogResult<ToolResult> {
        let columns = columns_arg(&args, "columns", &DEFAULT_COLUMNS)?;
        let total = conditional_sum(records, &columns)?;
        let data = json!({
            "columns": columns,
            "total": total,
            "record_count": records.len(),
        });
        Ok(ToolResult::new(
            "total_bytes",
            data,
            format!("{total} bytes"),
        ))
    }
}
