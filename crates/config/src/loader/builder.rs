//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that runs the load pipeline:
//!   locate the source, decode it into a schema, validate the environment.
//! - Provide the `try_load` and `must_load` entry points.
//!
//! Does NOT handle:
//! - Path precedence rules (see `locator`).
//! - Field resolution and coercion (see `decoder`).
//!
//! Invariants / Assumptions:
//! - An explicit config path (`with_config_path`) takes the place of the
//!   `-config` flag; a blank one falls through to `CONFIG_PATH`.
//! - Every stage failure propagates immediately; nothing is retried.
//! - Callers never receive a partially decoded schema.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::path::{Path, PathBuf};

use super::error::ConfigError;
use crate::constants::DOTENV_DISABLED_ENV;
use crate::decoder;
use crate::environment::Environment;
use crate::locator::SourceLocator;
use crate::schema::ConfigSchema;

/// A successfully loaded configuration.
#[derive(Debug, Clone)]
pub struct Loaded<S> {
    pub config: S,
    pub environment: Environment,
    /// The file the configuration was read from.
    pub path: PathBuf,
}

impl<S> Loaded<S> {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Split into the schema and its validated environment.
    pub fn into_parts(self) -> (S, Environment) {
        (self.config, self.environment)
    }
}

/// Configuration loader that resolves, decodes and validates a schema.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    use_process_args: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader that reads `-config` from the process arguments.
    pub fn new() -> Self {
        Self {
            config_path: None,
            use_process_args: true,
        }
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(DOTENV_DISABLED_ENV).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Use `path` as the flag value instead of parsing the process arguments.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Do not read `-config` from the process arguments; only `CONFIG_PATH`
    /// (or an explicit `with_config_path`) is consulted.
    pub fn without_process_args(mut self) -> Self {
        self.use_process_args = false;
        self
    }

    fn locator(&self) -> Result<SourceLocator, ConfigError> {
        match &self.config_path {
            Some(path) => Ok(SourceLocator::new(Some(path.clone()))),
            None if self.use_process_args => SourceLocator::from_process_args(),
            None => Ok(SourceLocator::new(None)),
        }
    }

    /// Run the pipeline for schema `S`.
    ///
    /// # Errors
    ///
    /// Any locate, read, decode or environment failure, unchanged.
    pub fn load<S: ConfigSchema>(&self) -> Result<Loaded<S>, ConfigError> {
        let resolved = self.locator()?.locate()?;

        let mut config = S::default();
        decoder::decode_file(resolved.path(), &mut config)?;

        let environment = Environment::from_name(config.environment_name())?;

        tracing::info!(
            path = %resolved.path().display(),
            source = %resolved.source(),
            %environment,
            "configuration loaded"
        );

        Ok(Loaded {
            config,
            environment,
            path: resolved.into_path(),
        })
    }
}

/// Load schema `S` with the default loader, returning any failure.
pub fn try_load<S: ConfigSchema>() -> Result<Loaded<S>, ConfigError> {
    ConfigLoader::new().load()
}

/// Load schema `S` or terminate the process.
///
/// Intended for service entry points: on failure the error is logged and
/// printed to stderr, and the process exits with status 1.
pub fn must_load<S: ConfigSchema>() -> (S, Environment) {
    match try_load::<S>() {
        Ok(loaded) => loaded.into_parts(),
        Err(err) => {
            tracing::error!(error = %err, "failed to load configuration");
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
