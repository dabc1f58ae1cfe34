//! Store codec — the persisted JSON form of a record sequence.
//!
//! The store is a JSON array of objects keyed `field_1..field_N` with
//! string values. Writes replace the whole file; there is no locking, so
//! callers sharing a store across processes must serialize access
//! themselves.

use std::path::{Component, Path, PathBuf};

use crate::error::{LogError, LogResult};
use crate::types::Record;

/// Serialize a record sequence to store bytes.
pub fn encode(records: &[Record]) -> LogResult<Vec<u8>> {
    serde_json::to_vec(records).map_err(|e| LogError::Encode(e.to_string()))
}

/// Deserialize store bytes. Any malformed input is a `CorruptStore` error.
pub fn decode(bytes: &[u8]) -> LogResult<Vec<Record>> {
    serde_json::from_slice(bytes).map_err(|e| LogError::CorruptStore(e.to_string()))
}

/// Where the store lives: a data directory plus a file name inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    dir: PathBuf,
    file_name: String,
}

impl StoreLocation {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the store file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Read and decode the store from disk.
    pub fn read(&self) -> LogResult<Vec<Record>> {
        let path = self.path();
        let bytes = std::fs::read(&path).map_err(|e| LogError::from_io(&path.display().to_string(), e))?;
        let records = decode(&bytes)?;
        tracing::debug!(store = %path.display(), records = records.len(), "store read");
        Ok(records)
    }

    /// Encode `records` and replace the store file with them.
    pub fn write(&self, records: &[Record]) -> LogResult<()> {
        let bytes = encode(records)?;
        let path = self.path();
        std::fs::write(&path, bytes).map_err(|e| LogError::from_io(&path.display().to_string(), e))
    }

    /// Copy the current store byte-for-byte to `name` in the data directory.
    ///
    /// `name` must be a single plain file name other than the store's own.
    pub fn save_as(&self, name: &str) -> LogResult<PathBuf> {
        let mut components = Path::new(name).components();
        let (Some(Component::Normal(_)), None) = (components.next(), components.next()) else {
            return Err(LogError::InvalidArgument(format!(
                "save target {name:?} must be a file name inside the data directory"
            )));
        };
        let src = self.path();
        let dst = self.dir.join(name);
        // Copying a file onto itself truncates it first.
        if dst == src {
            return Err(LogError::InvalidArgument(format!(
                "save target {name:?} is the store itself"
            )));
        }
        std::fs::copy(&src, &dst).map_err(|e| LogError::from_io(&src.display().to_string(), e))?;
        tracing::info!(from = %src.display(), to = %dst.display(), "store saved");
        Ok(dst)
    }

    /// Names of the entries in the data directory, sorted.
    pub fn list_dir(&self) -> LogResult<Vec<String>> {
        let dir = self.dir.display().to_string();
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(|e| LogError::from_io(&dir, e))? {
            let entry = entry.map_err(|e| LogError::from_io(&dir, e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}
