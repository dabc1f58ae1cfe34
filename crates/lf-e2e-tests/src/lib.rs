//! End-to-end tests for logfield live under `tests/`; this crate has no runtime code.
