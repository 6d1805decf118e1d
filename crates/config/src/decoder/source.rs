//! Configuration source reading.
//!
//! Responsibilities:
//! - Pick the source format from the file extension.
//! - Read the file and normalize YAML, JSON and TOML into one tree.
//!
//! Does NOT handle:
//! - Field lookup or coercion (see `decoder`).
//!
//! Invariants:
//! - The returned tree is a mapping; an empty document is an empty mapping.

use std::fmt;
use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::loader::ConfigError;

/// On-disk syntax of a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
    Toml,
}

impl SourceFormat {
    /// Determine the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(SourceFormat::Yaml),
            Some("json") => Ok(SourceFormat::Json),
            Some("toml") => Ok(SourceFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceFormat::Yaml => "yaml",
            SourceFormat::Json => "json",
            SourceFormat::Toml => "toml",
        })
    }
}

/// Read and normalize the configuration file at `path`.
pub fn read_tree(path: &Path) -> Result<Value, ConfigError> {
    let format = SourceFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), %format, "parsing configuration source");

    parse_tree(&content, format).map_err(|message| ConfigError::ConfigFileParse {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse `content` in `format` into a mapping tree.
pub fn parse_tree(content: &str, format: SourceFormat) -> Result<Value, String> {
    let tree = match format {
        SourceFormat::Yaml => serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string())?,
        SourceFormat::Json => {
            let json: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
            serde_yaml::to_value(json).map_err(|e| e.to_string())?
        }
        SourceFormat::Toml => {
            let table: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;
            serde_yaml::to_value(table).map_err(|e| e.to_string())?
        }
    };

    match tree {
        Value::Mapping(_) => Ok(tree),
        Value::Null => Ok(Value::Mapping(Mapping::new())),
        _ => Err("expected a mapping at the top level".to_string()),
    }
}
