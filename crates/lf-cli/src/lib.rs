//! Logfield — library crate behind the `logfield` binary.
//!
//! Exposes config, the query registry and the executor so integration
//! tests can drive the same code paths as the command line.

pub mod cli;
pub mod config;
pub mod executor;
pub mod registry;
