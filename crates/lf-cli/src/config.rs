//! Logfield configuration, loadable from TOML.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Deserialize;

use lf_engine::{StoreLocation, TokenizerConfig};

/// Tracing output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Top-level configuration. Every field has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogfieldConfig {
    /// Directory holding input logs and the store.
    pub data_dir: PathBuf,
    /// Store file name inside `data_dir`.
    pub store_file: String,
    /// Accepted input extension, without the dot.
    pub extension: String,
    /// Field delimiter; exactly one character.
    pub delimiter: String,
    /// Quote character; empty disables quoting.
    pub quote: String,
    pub log_format: LogFormat,
}

impl Default for LogfieldConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("/scripts"),
            store_file: "db.json".to_string(),
            extension: "log".to_string(),
            delimiter: " ".to_string(),
            quote: "|".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

fn single_char(name: &str, value: &str) -> anyhow::Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => bail!("{name} must be exactly one character, got {value:?}"),
    }
}

impl LogfieldConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.tokenizer_config()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Delimiter and quote as a validated tokenizer config.
    pub fn tokenizer_config(&self) -> anyhow::Result<TokenizerConfig> {
        let delimiter = single_char("delimiter", &self.delimiter)?;
        let quote = if self.quote.is_empty() {
            None
        } else {
            Some(single_char("quote", &self.quote)?)
        };
        if quote == Some(delimiter) {
            bail!("delimiter and quote must differ, both are {delimiter:?}");
        }
        Ok(TokenizerConfig { delimiter, quote })
    }

    pub fn store_location(&self) -> StoreLocation {
        StoreLocation::new(&self.data_dir, &self.store_file)
    }
}
