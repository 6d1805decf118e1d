//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test the end-to-end pipeline: locate, decode, validate environment.
//! - Test override and path precedence through the loader.
//! - Test dotenv loading behavior.
//! - Test the shipped section schemas through the loader.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;

use crate::schema::{ConfigSchema, FieldSpec, Section};

pub mod basic_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Override variable for `TestService.env`.
pub const APP_ENV_VAR: &str = "_SVC_LOADER_APP_ENV";

/// Override variable for `TestService.brokers`.
pub const BROKERS_VAR: &str = "_SVC_LOADER_BROKERS";

/// A small service schema: environment name and a broker list.
#[derive(Debug, Default)]
pub struct TestService {
    pub env: String,
    pub brokers: Vec<String>,
}

impl Section for TestService {
    fn fields() -> Vec<FieldSpec<Self>> {
        type F = FieldSpec<TestService>;
        vec![
            F::string("env", |c, v| c.env = v).env(APP_ENV_VAR).required(),
            F::list("brokers", |c, v| c.brokers = v).env(BROKERS_VAR),
        ]
    }
}

impl ConfigSchema for TestService {
    fn environment_name(&self) -> &str {
        &self.env
    }
}

/// Flat database schema with required connection fields.
#[derive(Debug, Default)]
pub struct DbService {
    pub env: String,
    pub host: String,
    pub port: u16,
}

impl Section for DbService {
    fn fields() -> Vec<FieldSpec<Self>> {
        type F = FieldSpec<DbService>;
        vec![
            F::string("env", |c, v| c.env = v).required(),
            F::string("host", |c, v| c.host = v).required(),
            F::integer("port", |c, v: u16| c.port = v).required(),
        ]
    }
}

impl ConfigSchema for DbService {
    fn environment_name(&self) -> &str {
        &self.env
    }
}

/// Write `content` to `name` inside `dir` and return the full path.
pub fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write config file");
    path
}
