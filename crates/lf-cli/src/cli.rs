//! Command-line surface: argument parsing and the mapping onto actions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use crate::executor::Action;

#[derive(Parser, Debug)]
#[command(
    name = "logfield",
    version,
    about = "Load delimited log files into a field store and query it"
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory holding logs and the store
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rebuild the store from log files (use `.` for every file in the data dir)
    Load {
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// List the data directory
    Show,

    /// Copy the store to another file in the data directory
    Save { name: String },

    /// List the available queries
    Queries,

    /// Most frequent value(s) of a field
    MostFreq {
        #[arg(long, default_value_t = 3)]
        column: usize,
    },

    /// Least frequent value(s) of a field
    LeastFreq {
        #[arg(long, default_value_t = 3)]
        column: usize,
    },

    /// Sum the numeric values of the given fields
    TotalBytes {
        #[arg(default_values_t = [2, 5])]
        columns: Vec<usize>,
    },

    /// Records per second across a Unix timestamp field
    EventsPerSecond {
        #[arg(long, default_value_t = 1)]
        column: usize,
    },
}

impl Command {
    pub fn into_action(self) -> Action {
        match self {
            Self::Load { files } => Action::Load { files },
            Self::Show => Action::Show,
            Self::Save { name } => Action::Save { name },
            Self::Queries => Action::ListQueries,
            Self::MostFreq { column } => Action::Query {
                tool: "most_freq".into(),
                args: json!({ "column": column }),
            },
            Self::LeastFreq { column } => Action::Query {
                tool: "least_freq".into(),
                args: json!({ "column": column }),
            },
            Self::TotalBytes { columns } => Action::Query {
                tool: "total_bytes".into(),
                args: json!({ "columns": columns }),
            },
            Self::EventsPerSecond { column } => Action::Query {
                tool: "events_per_second".into(),
                args: json!({ "column": column }),
            },
        }
    }
}
