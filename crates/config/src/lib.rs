//! Startup configuration for services.
//!
//! This crate resolves a configuration file (`-config` flag, then
//! `CONFIG_PATH`), decodes it into a strongly-typed schema described by an
//! explicit field table, applies per-field environment overrides and
//! defaults, and validates the runtime [`Environment`].
//!
//! ```no_run
//! use svc_config::{ConfigSchema, FieldSpec, Section, must_load};
//! use svc_config::sections::Database;
//!
//! #[derive(Default)]
//! struct Service {
//!     env: String,
//!     db: Database,
//! }
//!
//! impl Section for Service {
//!     fn fields() -> Vec<FieldSpec<Self>> {
//!         type F = FieldSpec<Service>;
//!         let mut fields = vec![F::string("env", |c, v| c.env = v).env("APP_ENV").required()];
//!         fields.extend(F::nested::<Database>("db", |c| &mut c.db));
//!         fields
//!     }
//! }
//!
//! impl ConfigSchema for Service {
//!     fn environment_name(&self) -> &str {
//!         &self.env
//!     }
//! }
//!
//! let (config, environment) = must_load::<Service>();
//! ```

pub mod constants;
pub mod decoder;
mod environment;
mod loader;
pub mod locator;
mod schema;
pub mod sections;

pub use decoder::{SourceFormat, decode, decode_file, decode_str};
pub use environment::Environment;
pub use loader::{ConfigError, ConfigLoader, Loaded, env_var_or_none, must_load, try_load};
pub use locator::{PathSource, ResolvedPath, SourceLocator};
pub use schema::{
    ConfigSchema, FieldKind, FieldMeta, FieldSpec, Section, override_variables, usage,
};
