//! Shared test utilities for svc-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Write configuration documents into temp directories.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - Host values for `CONFIG_PATH`, `APP_ENV` and section override
//!   variables never reach the child process.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Returns a hermetic `svc-cli` command for integration testing.
#[allow(dead_code)]
pub fn svc_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("svc-cli");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    clear_config_env(&mut cmd);
    cmd
}

/// Clear every variable the loader or the shipped sections read.
pub fn clear_config_env(cmd: &mut Command) {
    cmd.env_remove("CONFIG_PATH").env_remove("APP_ENV");
    for (key, _) in std::env::vars() {
        if key.starts_with("GRPC_") {
            cmd.env_remove(&key);
        }
    }
    for key in svc_config::override_variables::<svc_config::sections::GrpcClient>() {
        cmd.env_remove(key);
    }
}

/// Write `content` to `name` inside `dir` and return the full path.
pub fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write config");
    path
}
