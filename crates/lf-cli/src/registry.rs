//! Query tool registry.
//!
//! The executor looks tools up by name when dispatching a query command.

use std::collections::HashMap;

use serde::Serialize;

use lf_engine::{LogError, LogResult, QueryTool, Record, ToolResult};

/// Metadata about a registered tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub schema: serde_json::Value,
}

/// Query tools indexed by name.
pub struct QueryRegistry {
    tools: Vec<Box<dyn QueryTool>>,
    /// Map from tool name → index into `tools`.
    index: HashMap<String, usize>,
}

impl QueryRegistry {
    pub fn new(tools: Vec<Box<dyn QueryTool>>) -> Self {
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool.name().to_string(), i))
            .collect();
        Self { tools, index }
    }

    /// Build with every built-in query tool.
    pub fn with_defaults() -> Self {
        Self::new(lf_engine::query::all_tools())
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn QueryTool> {
        self.index.get(name).map(|&i| self.tools[i].as_ref())
    }

    /// Run the named tool against `records`.
    pub fn execute(
        &self,
        name: &str,
        args: serde_json::Value,
        records: &[Record],
    ) -> LogResult<ToolResult> {
        let tool = self
            .lookup(name)
            .ok_or_else(|| LogError::InvalidArgument(format!("unknown query: {name}")))?;
        tracing::debug!(tool = name, args = %args, records = records.len(), "running query");
        tool.execute(args, records)
    }

    /// List all registered tools with metadata.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|tool| ToolInfo {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                schema: tool.parameters_schema(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
