//! Shared test harness for E2E tests.
//!
//! Runs CLI argument vectors through the real parser, executor and
//! filesystem source against a throwaway data directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;

use lf_cli::cli::Cli;
use lf_cli::config::LogfieldConfig;
use lf_cli::executor::{CommandExecutor, Outcome};
use lf_cli::registry::QueryRegistry;
use lf_engine::{FileLogSource, LogResult, Record, StoreLocation};

/// A temporary data directory plus the config pointing at it.
pub struct TestHarness {
    pub dir: TempDir,
    pub config: LogfieldConfig,
    pub registry: QueryRegistry,
}

impl TestHarness {
    /// Empty data directory with default settings.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = LogfieldConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        Self {
            dir,
            config,
            registry: QueryRegistry::with_defaults(),
        }
    }

    /// Data directory with a squid-style `access.log`.
    pub fn with_access_log() -> Self {
        let h = Self::new();
        h.write_log(
            "access.log",
            &[
                "1157689312.049   5006 10.105.21.199 TCP_MISS/200 19763 CONNECT login.yahoo.com:443 badeyek DIRECT/209.73.177.115 -",
                "1157689320.327   2864 10.105.21.199 TCP_MISS/200 10182 GET http://www.goonernews.com/ badeyek DIRECT/207.58.145.61 text/html",
                "1157689320.343   1357 10.105.21.199 TCP_REFRESH_HIT/304 214 GET http://www.goonernews.com/styles.css badeyek DIRECT/207.58.145.61 -",
                "",
                "1157689322.780    163 10.105.11.24 TCP_MISS/200 9526 GET http://www.cnn.com/ - DIRECT/64.236.16.20 text/html",
                "1157689332.049    295 10.105.33.145 TCP_DENIED/403 |n/a| GET |http://ads.example.com/a b.gif| - NONE/- text/html",
            ],
        );
        h
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file into the data directory, one line per entry.
    pub fn write_log(&self, name: &str, lines: &[&str]) -> PathBuf {
        let path = self.path().join(name);
        let mut content = lines.join("\n");
        content.push('\n');
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn store(&self) -> StoreLocation {
        self.config.store_location()
    }

    pub fn read_store(&self) -> Vec<Record> {
        self.store().read().unwrap()
    }

    /// Parse `args` (without the program name) and execute them.
    pub fn run(&self, args: &[&str]) -> LogResult<Outcome> {
        let argv = std::iter::once("logfield").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        let source = FileLogSource;
        let executor = CommandExecutor::new(&self.config, &self.registry, &source).unwrap();
        executor.execute(&cli.command.into_action())
    }

    /// Execute and render as plain text; panics on engine errors.
    pub fn run_text(&self, args: &[&str]) -> String {
        self.run(args).unwrap().render(false).unwrap()
    }

    /// Execute and return the JSON `data` of a query result.
    pub fn query_data(&self, args: &[&str]) -> serde_json::Value {
        match self.run(args).unwrap() {
            Outcome::Query(result) => result.data,
            other => panic!("expected a query outcome, got {other:?}"),
        }
    }
}
