//! Configuration loading pipeline.
//!
//! Responsibilities:
//! - Orchestrate source location, decoding and environment validation for
//!   any `ConfigSchema`.
//! - Provide a builder-pattern `ConfigLoader` plus `try_load`/`must_load`.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Field descriptor tables (see `schema`).
//! - Reloading or merging configuration sources.
//!
//! Invariants / Assumptions:
//! - Per-field override variables take precedence over file values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;

pub use builder::{ConfigLoader, Loaded, must_load, try_load};
pub use env::env_var_or_none;
pub(crate) use env::env_override;
pub use error::ConfigError;

#[cfg(test)]
mod tests;
