//! Record ingestion and query engine for delimited log files.
//!
//! Splits log lines into positional fields, builds one record sequence
//! from a list of input files, persists it as a JSON store, and answers
//! aggregate queries against the decoded store: most/least frequent value,
//! conditional numeric sum, and event rate from a timestamp span.

pub mod builder;
pub mod codec;
pub mod error;
pub mod mock;
pub mod query;
pub mod source;
pub mod tokenizer;
pub mod types;

// Re-export key types for convenience
pub use builder::{LoadReport, RecordBuilder, SkipReason, SkippedFile, resolve_paths, validate_file};
pub use codec::{StoreLocation, decode, encode};
pub use error::{LogError, LogResult};
pub use mock::MockLogSource;
pub use query::{EventRate, FrequencyMode, conditional_sum, event_rate, frequency_mode};
pub use source::{FileLogSource, LogSource};
pub use tokenizer::{TokenizerConfig, tokenize};
pub use types::{QueryTool, Record, ToolResult};
