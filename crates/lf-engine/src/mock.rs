//! Mock log source for testing — serves pre-loaded file content.

use std::collections::BTreeMap;

use crate::error::{LogError, LogResult};
use crate::source::{LogSource, has_extension};

/// A mock log source that serves pre-loaded content by path.
pub struct MockLogSource {
    files: BTreeMap<String, Vec<String>>,
}

impl MockLogSource {
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    /// Add a file with the given lines.
    pub fn add_file(&mut self, path: impl Into<String>, lines: Vec<String>) {
        self.files.insert(path.into(), lines);
    }

    /// Create a mock with a squid-style access log at `/scripts/access.log`.
    ///
    /// Field 1 is the epoch timestamp, 3 the client address, 5 the size.
    pub fn with_access_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            "/scripts/access.log",
            vec![
                "1157689312.049   5006 10.105.21.199 TCP_MISS/200 19763 CONNECT login.yahoo.com:443 badeyek DIRECT/209.73.177.115 -".into(),
                "1157689320.327   2864 10.105.21.199 TCP_MISS/200 10182 GET http://www.goonernews.com/ badeyek DIRECT/207.58.145.61 text/html".into(),
                "1157689320.343   1357 10.105.21.199 TCP_REFRESH_HIT/304 214 GET http://www.goonernews.com/styles.css badeyek DIRECT/207.58.145.61 -".into(),
                "".into(),
                "1157689321.315      1 10.105.21.199 TCP_HIT/200 1464 GET http://www.goonernews.com/styles.css badeyek NONE/- text/css".into(),
                "1157689322.780    163 10.105.11.24 TCP_MISS/200 9526 GET http://www.cnn.com/ - DIRECT/64.236.16.20 text/html".into(),
                "1157689322.826    295 10.105.33.145 TCP_DENIED/403 1337 GET http://ads.example.com/banner.gif - NONE/- text/html".into(),
                "1157689324.120    116 10.105.11.24 TCP_MISS/200 434 GET http://www.cnn.com/favicon.ico - DIRECT/64.236.16.20 image/x-icon".into(),
                "1157689332.049   5006 10.105.37.2 TCP_MISS/200 |not a number| GET http://example.org/ - DIRECT/93.184.216.34 text/html".into(),
            ],
        );
        m
    }
}

impl Default for MockLogSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSource for MockLogSource {
    fn read_lines(&self, path: &str) -> LogResult<Vec<String>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LogError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn list_sources(&self, dir: &str, extension: &str) -> LogResult<Vec<String>> {
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        Ok(self
            .files
            .keys()
            .filter(|p| {
                p.strip_prefix(&prefix)
                    .is_some_and(|name| !name.contains('/'))
            })
            .filter(|p| has_extension(p, extension))
            .cloned()
            .collect())
    }
}
