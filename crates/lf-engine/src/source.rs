//! Log source abstraction — read input files from disk or from mocks.

use std::path::Path;

use crate::error::{LogError, LogResult};

/// Abstraction over where input log files come from.
///
/// Enables mocking for tests; the record builder only reads through this.
pub trait LogSource: Send + Sync {
    /// Read all lines from the given path.
    fn read_lines(&self, path: &str) -> LogResult<Vec<String>>;

    /// Check if a source path exists.
    fn exists(&self, path: &str) -> bool;

    /// List the files in `dir` whose name ends in `.{extension}`, sorted.
    fn list_sources(&self, dir: &str, extension: &str) -> LogResult<Vec<String>>;
}

/// True if `path` ends in `.{extension}`. An empty extension accepts anything.
pub fn has_extension(path: &str, extension: &str) -> bool {
    extension.is_empty()
        || path
            .strip_suffix(extension)
            .is_some_and(|stem| stem.ends_with('.'))
}

/// Reads logs from the local filesystem.
pub struct FileLogSource;

impl LogSource for FileLogSource {
    fn read_lines(&self, path: &str) -> LogResult<Vec<String>> {
        let content = std::fs::read_to_string(path).map_err(|e| LogError::from_io(path, e))?;
        Ok(content.lines().map(String::from).collect())
    }

    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn list_sources(&self, dir: &str, extension: &str) -> LogResult<Vec<String>> {
        let entries = std::fs::read_dir(dir).map_err(|e| LogError::from_io(dir, e))?;
        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LogError::from_io(dir, e))?;
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.path().display().to_string();
            if has_extension(&path, extension) {
                found.push(path);
            }
        }
        found.sort();
        Ok(found)
    }
}
