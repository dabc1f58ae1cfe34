//! Core record types and the QueryTool trait.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LogResult;

/// Key prefix used for fields in the persisted store (`field_1`, `field_2`, ...).
pub const FIELD_KEY_PREFIX: &str = "field_";

/// Format the persisted key for a 1-based field index.
pub fn field_key(index: usize) -> String {
    format!("{FIELD_KEY_PREFIX}{index}")
}

/// Parse a persisted key back into its 1-based field index.
///
/// Returns `None` for anything other than `field_<N>` with `N >= 1`.
pub fn parse_field_key(key: &str) -> Option<usize> {
    let digits = key.strip_prefix(FIELD_KEY_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<usize>().ok().filter(|&n| n >= 1)
}

// ── Record ────────────────────────────────────────────────────

/// One parsed log line, addressed by 1-based field index.
///
/// Field indices are always `1..=len()`, with no gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    /// Build a record whose field `i` is `fields[i - 1]`.
    pub fn from_fields(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Value of the 1-based field `index`, if this record has it.
    pub fn get(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.fields.get(i))
            .map(String::as_str)
    }

    /// Number of fields (the highest valid index).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, v)| (i + 1, v.as_str()))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (index, value) in self.iter() {
            map.serialize_entry(&field_key(index), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with string values keyed field_1..field_N")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut by_index: BTreeMap<usize, String> = BTreeMap::new();

        while let Some(key) = access.next_key::<String>()? {
            let index = parse_field_key(&key)
                .ok_or_else(|| de::Error::custom(format!("unexpected key {key:?}")))?;
            let value: String = access.next_value()?;
            if by_index.insert(index, value).is_some() {
                return Err(de::Error::custom(format!("duplicate key {key:?}")));
            }
        }

        // BTreeMap iterates in index order, so the first mismatch is the gap.
        let mut fields = Vec::with_capacity(by_index.len());
        for (expected, (index, value)) in (1..).zip(by_index) {
            if index != expected {
                return Err(de::Error::custom(format!(
                    "missing key {:?}",
                    field_key(expected)
                )));
            }
            fields.push(value);
        }

        Ok(Record { fields })
    }
}

// ── Tool Result ───────────────────────────────────────────────

/// Result of executing a query tool.
///
/// Query failures surface as `LogError`, so every result carries data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool name that produced this result.
    pub tool_name: String,
    /// Structured result data (JSON).
    pub data: serde_json::Value,
    /// Human-readable summary.
    pub summary: String,
}

impl ToolResult {
    pub fn new(
        tool_name: impl Into<String>,
        data: serde_json::Value,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            data,
            summary: summary.into(),
        }
    }
}

// ── QueryTool Trait ───────────────────────────────────────────

/// A named aggregate query over a decoded record sequence.
///
/// Tools are pure: they never mutate the records or touch the store.
pub trait QueryTool: Send + Sync {
    /// Tool name (e.g., "most_freq").
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema describing accepted arguments.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Run the query with JSON arguments against a record sequence.
    fn execute(&self, args: serde_json::Value, records: &[Record]) -> LogResult<ToolResult>;
}
