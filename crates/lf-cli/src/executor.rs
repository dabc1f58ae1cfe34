//! Command executor — runs one CLI action against the store.
//!
//! Every action reads the store fresh from disk; nothing is cached between
//! invocations.

use std::path::PathBuf;

use serde::Serialize;

use lf_engine::{
    LoadReport, LogError, LogResult, LogSource, RecordBuilder, SkipReason, StoreLocation,
    ToolResult, resolve_paths,
};

use crate::config::LogfieldConfig;
use crate::registry::{QueryRegistry, ToolInfo};

/// One thing the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Rebuild the store from these file names (`.` = whole data dir).
    Load { files: Vec<String> },
    /// List the data directory.
    Show,
    /// Copy the store to another name in the data directory.
    Save { name: String },
    /// Describe the registered query tools.
    ListQueries,
    /// Run a named query tool.
    Query {
        tool: String,
        args: serde_json::Value,
    },
}

/// What an action produced.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Loaded(LoadReport),
    Listing { entries: Vec<String> },
    Saved { path: PathBuf },
    Queries { tools: Vec<ToolInfo> },
    Query(ToolResult),
}

/// Executes actions against one store location and input source.
pub struct CommandExecutor<'a> {
    registry: &'a QueryRegistry,
    source: &'a dyn LogSource,
    builder: RecordBuilder,
    store: StoreLocation,
    extension: String,
}

impl<'a> CommandExecutor<'a> {
    pub fn new(
        config: &LogfieldConfig,
        registry: &'a QueryRegistry,
        source: &'a dyn LogSource,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            registry,
            source,
            builder: RecordBuilder::new(config.tokenizer_config()?),
            store: config.store_location(),
            extension: config.extension.clone(),
        })
    }

    pub fn execute(&self, action: &Action) -> LogResult<Outcome> {
        match action {
            Action::Load { files } => {
                let paths = resolve_paths(self.source, &self.store, files, &self.extension)?;
                let report = self
                    .builder
                    .load(self.source, &paths, &self.extension, &self.store)?;
                Ok(Outcome::Loaded(report))
            }
            Action::Show => Ok(Outcome::Listing {
                entries: self.store.list_dir()?,
            }),
            Action::Save { name } => Ok(Outcome::Saved {
                path: self.store.save_as(name)?,
            }),
            Action::ListQueries => Ok(Outcome::Queries {
                tools: self.registry.list_tools(),
            }),
            Action::Query { tool, args } => {
                let records = self.store.read()?;
                let result = self.registry.execute(tool, args.clone(), &records)?;
                Ok(Outcome::Query(result))
            }
        }
    }
}

impl Outcome {
    /// Render for the terminal: pretty JSON, or the plain-text lines.
    pub fn render(&self, json: bool) -> LogResult<String> {
        if json {
            return serde_json::to_string_pretty(self).map_err(|e| LogError::Encode(e.to_string()));
        }
        let lines = match self {
            Self::Loaded(report) => render_load(report),
            Self::Listing { entries } => entries.clone(),
            Self::Saved { path } => vec![format!(
                "The file was saved successfully to {}",
                path.display()
            )],
            Self::Queries { tools } => tools
                .iter()
                .map(|tool| format!("{:<18} {}", tool.name, tool.description))
                .collect(),
            Self::Query(result) => render_query(result),
        };
        Ok(lines.join("\n"))
    }
}

fn render_load(report: &LoadReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .skipped
        .iter()
        .map(|skip| match &skip.reason {
            SkipReason::NotFound => format!(
                "Error: Invalid file path/name. Path {} does not exist.",
                skip.path
            ),
            SkipReason::WrongExtension { expected } => format!(
                "Error: Invalid file format. {} must be a .{expected} file.",
                skip.path
            ),
            SkipReason::Unreadable { message } => {
                format!("Error: Could not read {}: {message}", skip.path)
            }
        })
        .collect();
    if report.record_count > 0 {
        lines.push(format!(
            "File successfully loaded ({} records from {} file(s))",
            report.record_count,
            report.accepted.len()
        ));
    } else {
        lines.push("No records loaded".to_string());
    }
    lines
}

fn render_query(result: &ToolResult) -> Vec<String> {
    let data = &result.data;
    match result.tool_name.as_str() {
        "most_freq" | "least_freq" => {
            let mut lines: Vec<String> = data["values"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|v| v.as_str().map(String::from))
                .collect();
            lines.push(format!("All values were {} times", data["count"]));
            lines
        }
        "total_bytes" => vec![format!("{} bytes", data["total"])],
        "events_per_second" => vec![data["rate"].to_string()],
        _ => vec![result.summary.clone()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf_engine::MockLogSource;
    use serde_json::json;

    fn config_in(dir: &std::path::Path) -> LogfieldConfig {
        LogfieldConfig {
            data_dir: dir.to_path_buf(),
            ..Default::default()
        }
    }

    fn sample_source(dir: &std::path::Path) -> MockLogSource {
        let mut source = MockLogSource::new();
        let path = dir.join("access.log").display().to_string();
        source.add_file(
            path,
            vec![
                "100.0 10 10.0.0.1 x 5".into(),
                "100.0 20 10.0.0.2 x abc".into(),
                "110.0 30 10.0.0.1 x 7".into(),
            ],
        );
        source
    }

    #[test]
    fn load_then_query() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let registry = QueryRegistry::with_defaults();
        let source = sample_source(dir.path());
        let executor = CommandExecutor::new(&config, &registry, &source).unwrap();

        let loaded = executor
            .execute(&Action::Load {
                files: vec!["access.log".into()],
            })
            .unwrap();
        let Outcome::Loaded(report) = loaded else {
            panic!("expected load outcome");
        };
        assert_eq!(report.record_count, 3);

        let out = executor
            .execute(&Action::Query {
                tool: "total_bytes".into(),
                args: json!({}),
            })
            .unwrap();
        assert_eq!(out.render(false).unwrap(), "72 bytes");
    }

    #[test]
    fn query_without_store_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let registry = QueryRegistry::with_defaults();
        let source = MockLogSource::new();
        let executor = CommandExecutor::new(&config, &registry, &source).unwrap();

        let err = executor
            .execute(&Action::Query {
                tool: "most_freq".into(),
                args: json!({}),
            })
            .unwrap_err();
        assert!(matches!(err, LogError::NotFound(_)));
    }

    #[test]
    fn invalid_tokenizer_config_is_rejected() {
        let config = LogfieldConfig {
            delimiter: "ab".into(),
            ..Default::default()
        };
        let registry = QueryRegistry::with_defaults();
        let source = MockLogSource::new();
        assert!(CommandExecutor::new(&config, &registry, &source).is_err());
    }

    #[test]
    fn render_frequency_lists_ties_then_count() {
        let result = ToolResult::new(
            "most_freq",
            json!({"column": 3, "values": ["a", "c"], "count": 2}),
            "2 value(s)",
        );
        assert_eq!(
            Outcome::Query(result).render(false).unwrap(),
            "a\nc\nAll values were 2 times"
        );
    }

    #[test]
    fn render_load_reports_skips() {
        let report = LoadReport {
            skipped: vec![
                lf_engine::SkippedFile {
                    path: "/scripts/a.log".into(),
                    reason: SkipReason::NotFound,
                },
                lf_engine::SkippedFile {
                    path: "/scripts/b.txt".into(),
                    reason: SkipReason::WrongExtension {
                        expected: "log".into(),
                    },
                },
            ],
            ..Default::default()
        };
        let text = Outcome::Loaded(report).render(false).unwrap();
        assert_eq!(
            text,
            "Error: Invalid file path/name. Path /scripts/a.log does not exist.\n\
             Error: Invalid file format. /scripts/b.txt must be a .log file.\n\
             No records loaded"
        );
    }

    #[test]
    fn list_queries_describes_every_tool() {
        let config = LogfieldConfig::default();
        let registry = QueryRegistry::with_defaults();
        let source = MockLogSource::new();
        let executor = CommandExecutor::new(&config, &registry, &source).unwrap();

        let out = executor.execute(&Action::ListQueries).unwrap();
        let text = out.render(false).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("most_freq "));

        let value: serde_json::Value = serde_json::from_str(&out.render(true).unwrap()).unwrap();
        assert_eq!(value["kind"], "queries");
        assert_eq!(value["tools"][2]["name"], "total_bytes");
        assert_eq!(value["tools"][2]["schema"]["properties"]["columns"]["default"], json!([2, 5]));
    }

    #[test]
    fn unrecognized_tool_renders_summary() {
        let result = ToolResult::new("custom", json!({}), "custom summary");
        assert_eq!(Outcome::Query(result).render(false).unwrap(), "custom summary");
    }

    #[test]
    fn render_json_is_tagged() {
        let out = Outcome::Listing {
            entries: vec!["db.json".into()],
        };
        let value: serde_json::Value = serde_json::from_str(&out.render(true).unwrap()).unwrap();
        assert_eq!(value["kind"], "listing");
        assert_eq!(value["entries"], json!(["db.json"]));
    }
}
