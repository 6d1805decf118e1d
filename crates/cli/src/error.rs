//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ConfigError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-4 are reserved for specific error categories.

use svc_config::ConfigError;

/// Structured exit codes for svc-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure (including `.env` problems).
    GeneralError = 1,

    /// No configuration file could be located.
    ///
    /// Scripts should pass `-config` or set `CONFIG_PATH`.
    SourceNotFound = 2,

    /// The file was found but could not be read, parsed or decoded.
    InvalidConfig = 3,

    /// The document names an environment outside local/dev/staging/prod.
    UnrecognizedEnvironment = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::PathNotFound
            | ConfigError::FileNotFound { .. }
            | ConfigError::InvalidFlag(_) => ExitCode::SourceNotFound,

            ConfigError::ConfigFileRead { .. }
            | ConfigError::ConfigFileParse { .. }
            | ConfigError::UnsupportedFormat { .. }
            | ConfigError::InvalidValue { .. }
            | ConfigError::RequiredFieldMissing(_) => ExitCode::InvalidConfig,

            ConfigError::UnrecognizedEnvironment(_) => ExitCode::UnrecognizedEnvironment,

            ConfigError::DotenvParse { .. }
            | ConfigError::DotenvIo { .. }
            | ConfigError::DotenvUnknown => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no ConfigError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ConfigError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}
