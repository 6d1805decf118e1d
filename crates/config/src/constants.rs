//! Centralized constants for the configuration pipeline.
//!
//! Names of the process-level knobs (flag, environment variables) and the
//! literals shared between the decoder and error reporting.

// =============================================================================
// Source Location
// =============================================================================

/// Name of the command-line flag carrying the configuration file path.
///
/// Accepted as `-config`, `--config`, `-config=<path>` and `--config=<path>`.
pub const CONFIG_FLAG: &str = "config";

/// Environment variable consulted when the flag is absent or blank.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Environment variable that disables `.env` loading when set to `1` or `true`.
pub const DOTENV_DISABLED_ENV: &str = "DOTENV_DISABLED";

// =============================================================================
// Decoding
// =============================================================================

/// Delimiter used to split list fields unless the field declares its own.
pub const DEFAULT_LIST_DELIMITER: char = ',';

/// Placeholder printed instead of secret values.
pub const REDACTED: &str = "[REDACTED]";
