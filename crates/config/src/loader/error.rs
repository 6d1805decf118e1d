//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every stage of the load pipeline
//!   (locate, read, decode, environment validation, dotenv).
//!
//! Does NOT handle:
//! - Deciding whether a failure is fatal (see `must_load` and the CLI).
//!
//! Invariants:
//! - All error variants include context for debugging (field keys, paths, names).
//! - `InvalidValue.value` holds `[REDACTED]` for secret fields; raw secrets
//!   never reach an error message.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration path not found. Pass -config <path> or set CONFIG_PATH.")]
    PathNotFound,

    #[error("Configuration file not found at {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid -config flag: {0}")]
    InvalidFlag(String),

    #[error("Failed to read config file at {path}")]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {message}")]
    ConfigFileParse { path: PathBuf, message: String },

    #[error("Unsupported config file format at {path} (expected .yaml, .yml, .json or .toml)")]
    UnsupportedFormat { path: PathBuf },

    /// A field's raw value could not be coerced to its declared type.
    #[error("Invalid value for {field} ({value:?}): {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {0}")]
    RequiredFieldMissing(String),

    #[error("Unrecognized environment {0:?} (expected one of: local, dev, staging, prod)")]
    UnrecognizedEnvironment(String),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    /// Name of the field this error is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue { field, .. } => Some(field),
            ConfigError::RequiredFieldMissing(field) => Some(field),
            _ => None,
        }
    }
}
