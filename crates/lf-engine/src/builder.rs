//! Record builder — turns validated input files into one record sequence.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::codec::StoreLocation;
use crate::error::LogResult;
use crate::source::{LogSource, has_extension};
use crate::tokenizer::{TokenizerConfig, tokenize};
use crate::types::Record;

/// Why an input file contributed no records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    NotFound,
    WrongExtension { expected: String },
    Unreadable { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("path does not exist"),
            Self::WrongExtension { expected } => write!(f, "must be a .{expected} file"),
            Self::Unreadable { message } => write!(f, "unreadable: {message}"),
        }
    }
}

/// An input file left out of a load, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: SkipReason,
}

/// Outcome of building a record sequence from a list of files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    #[serde(skip)]
    pub records: Vec<Record>,
    pub record_count: usize,
    pub accepted: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

/// Check that `path` exists and carries the expected extension.
pub fn validate_file(source: &dyn LogSource, path: &str, extension: &str) -> Result<(), SkipReason> {
    if !source.exists(path) {
        return Err(SkipReason::NotFound);
    }
    if !has_extension(path, extension) {
        return Err(SkipReason::WrongExtension {
            expected: extension.to_string(),
        });
    }
    Ok(())
}

/// Resolve file names given on the command line against the store's
/// data directory.
///
/// A single `.` expands to every file in that directory with `extension`,
/// leaving out the store file itself.
pub fn resolve_paths(
    source: &dyn LogSource,
    store: &StoreLocation,
    names: &[String],
    extension: &str,
) -> LogResult<Vec<String>> {
    let dir = store.dir();
    if let [only] = names
        && only == "."
    {
        let store_path = store.path();
        let listed = source.list_sources(&dir.display().to_string(), extension)?;
        return Ok(listed
            .into_iter()
            .filter(|path| Path::new(path) != store_path)
            .collect());
    }
    Ok(names
        .iter()
        .map(|name| dir.join(name).display().to_string())
        .collect())
}

/// Builds records from tokenized lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordBuilder {
    config: TokenizerConfig,
}

impl RecordBuilder {
    pub fn new(config: TokenizerConfig) -> Self {
        Self { config }
    }

    /// One record per line with at least one non-empty token, in line order.
    pub fn records_from_lines(&self, lines: &[String]) -> Vec<Record> {
        lines
            .iter()
            .map(|line| tokenize(line, &self.config))
            .filter(|tokens| !tokens.is_empty())
            .map(Record::from_fields)
            .collect()
    }

    /// Build a record sequence from `paths`, in the order given.
    ///
    /// Files that fail validation or cannot be read are skipped and
    /// reported; they never abort the build.
    pub fn build(&self, source: &dyn LogSource, paths: &[String], extension: &str) -> LoadReport {
        let mut report = LoadReport::default();

        for path in paths {
            let lines = validate_file(source, path, extension).and_then(|()| {
                source.read_lines(path).map_err(|e| SkipReason::Unreadable {
                    message: e.to_string(),
                })
            });
            let lines = match lines {
                Ok(lines) => lines,
                Err(reason) => {
                    tracing::warn!(path = %path, reason = %reason, "skipping input file");
                    report.skipped.push(SkippedFile {
                        path: path.clone(),
                        reason,
                    });
                    continue;
                }
            };

            let records = self.records_from_lines(&lines);
            tracing::debug!(
                path = %path,
                lines = lines.len(),
                records = records.len(),
                "file tokenized"
            );
            report.records.extend(records);
            report.accepted.push(path.clone());
        }

        report.record_count = report.records.len();
        report
    }

    /// Build from `paths` and overwrite the store with the result.
    ///
    /// The store is rewritten even when no file was accepted.
    pub fn load(
        &self,
        source: &dyn LogSource,
        paths: &[String],
        extension: &str,
        store: &StoreLocation,
    ) -> LogResult<LoadReport> {
        let report = self.build(source, paths, extension);
        store.write(&report.records)?;
        tracing::info!(
            store = %store.path().display(),
            records = report.record_count,
            accepted = report.accepted.len(),
            skipped = report.skipped.len(),
            "store rebuilt"
        );
        Ok(report)
    }
}
