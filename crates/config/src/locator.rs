//! Configuration source location.
//!
//! Responsibilities:
//! - Pick the configuration file path: `-config` flag first, then `CONFIG_PATH`.
//! - Verify the chosen path exists.
//! - Extract the `-config` flag from the process arguments exactly once.
//!
//! Does NOT handle:
//! - Reading or parsing the file (see `decoder::source`).
//!
//! Invariants:
//! - Blank values (empty or whitespace-only) count as unset for both sources.
//! - Only the `config` flag is inspected; every other argument is left to the host.
//! - The process arguments are parsed at most once per process.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use clap::Parser;

use crate::constants::{CONFIG_FLAG, CONFIG_PATH_ENV};
use crate::loader::{ConfigError, env_var_or_none};

/// Which source supplied the configuration path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    Flag,
    EnvVar,
}

impl fmt::Display for PathSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSource::Flag => write!(f, "-{CONFIG_FLAG} flag"),
            PathSource::EnvVar => write!(f, "{CONFIG_PATH_ENV} environment variable"),
        }
    }
}

/// An existing configuration path and the source that named it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    path: PathBuf,
    source: PathSource,
}

impl ResolvedPath {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> PathSource {
        self.source
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Resolves the configuration path from an explicit flag value and `CONFIG_PATH`.
#[derive(Debug, Clone, Default)]
pub struct SourceLocator {
    flag: Option<PathBuf>,
}

impl SourceLocator {
    /// Create a locator with an already-parsed flag value.
    pub fn new(flag: Option<PathBuf>) -> Self {
        Self { flag }
    }

    /// Create a locator from the `-config` flag in the process arguments.
    pub fn from_process_args() -> Result<Self, ConfigError> {
        Ok(Self::new(process_config_flag()?))
    }

    /// Determine the configuration path.
    ///
    /// # Errors
    ///
    /// - `PathNotFound` if neither the flag nor `CONFIG_PATH` is set.
    /// - `FileNotFound` if the chosen path does not exist.
    pub fn locate(&self) -> Result<ResolvedPath, ConfigError> {
        let (path, source) = if let Some(flag) = self.flag.as_deref().and_then(non_blank) {
            (flag, PathSource::Flag)
        } else if let Some(value) = env_var_or_none(CONFIG_PATH_ENV) {
            (PathBuf::from(value), PathSource::EnvVar)
        } else {
            return Err(ConfigError::PathNotFound);
        };

        tracing::debug!(path = %path.display(), %source, "resolved configuration path");

        if !path.exists() {
            return Err(ConfigError::FileNotFound { path });
        }
        Ok(ResolvedPath { path, source })
    }
}

fn non_blank(path: &Path) -> Option<PathBuf> {
    match path.to_str() {
        Some(text) if text.trim().is_empty() => None,
        Some(text) => Some(PathBuf::from(text.trim())),
        None if path.as_os_str().is_empty() => None,
        None => Some(path.to_path_buf()),
    }
}

#[derive(Debug, Parser)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct FlagArgs {
    #[arg(long = CONFIG_FLAG, allow_hyphen_values = true)]
    config: Option<PathBuf>,
}

/// Reduce `args` to the tokens of the last `config` flag occurrence.
///
/// Accepts `-config <p>`, `--config <p>`, `-config=<p>` and `--config=<p>`,
/// and stops at `--`. The result is `[]`, `["--config"]` (flag without a
/// value) or `["--config", <p>]`.
pub fn normalize_config_flag<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let long = format!("--{CONFIG_FLAG}");
    let short = format!("-{CONFIG_FLAG}");
    let mut found: Option<Option<OsString>> = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str() else {
            continue;
        };
        if text == "--" {
            break;
        }
        if text == long || text == short {
            found = Some(args.next());
            continue;
        }
        let inline = text
            .strip_prefix(&long)
            .or_else(|| text.strip_prefix(&short))
            .and_then(|rest| rest.strip_prefix('='));
        if let Some(value) = inline {
            found = Some(Some(OsString::from(value)));
        }
    }

    match found {
        None => Vec::new(),
        Some(None) => vec![OsString::from(long)],
        Some(Some(value)) => vec![OsString::from(long), value],
    }
}

/// Parse the `config` flag out of `args`, ignoring every other argument.
pub fn parse_config_flag<I>(args: I) -> Result<Option<PathBuf>, String>
where
    I: IntoIterator<Item = OsString>,
{
    FlagArgs::try_parse_from(normalize_config_flag(args))
        .map(|parsed| parsed.config)
        .map_err(|e| e.to_string().trim().to_string())
}

/// The `config` flag of the current process, parsed on first use.
pub fn process_config_flag() -> Result<Option<PathBuf>, ConfigError> {
    static FLAG: OnceLock<Result<Option<PathBuf>, String>> = OnceLock::new();
    FLAG.get_or_init(|| parse_config_flag(std::env::args_os().skip(1)))
        .clone()
        .map_err(ConfigError::InvalidFlag)
}
