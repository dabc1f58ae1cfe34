//! Engine error types.

use thiserror::Error;

/// Errors that can occur while loading or querying the record store.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("corrupt store: {0}")]
    CorruptStore(String),

    #[error("failed to encode store: {0}")]
    Encode(String),

    #[error("no record has field_{column}")]
    EmptyStore { column: usize },

    #[error("invalid timestamp in field_{column}: {value:?}")]
    InvalidTimestamp { column: usize, value: String },

    #[error("all timestamps equal {timestamp}, event rate is undefined")]
    DegenerateSpan { timestamp: f64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("numeric overflow: {0}")]
    Overflow(String),
}

impl LogError {
    /// Map an I/O error on `path`, keeping "not found" distinguishable.
    pub fn from_io(path: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path.to_string())
        } else {
            Self::Io(format!("{path}: {err}"))
        }
    }
}

/// Convenience alias for engine results.
pub type LogResult<T> = Result<T, LogError>;
