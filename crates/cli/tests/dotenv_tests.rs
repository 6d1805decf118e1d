//! Integration tests for `.env` handling in the CLI.
//!
//! Invariants:
//! - Tests must explicitly clear `DOTENV_DISABLED` to enable dotenv loading.
//! - Tests use temp directories and set current_dir to isolate `.env` file effects.

mod common;

use common::{clear_config_env, write_config};
use predicates::prelude::*;
use tempfile::TempDir;

fn dotenv_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("svc-cli");
    cmd.current_dir(dir.path());
    clear_config_env(&mut cmd);
    cmd.env_remove("DOTENV_DISABLED");
    cmd
}

#[test]
fn test_dotenv_supplies_config_path() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "svc.yaml",
        "env: dev\nredis:\n  host: cache\n  port: 6379\n",
    );
    write_config(
        &dir,
        ".env",
        &format!("CONFIG_PATH={}\nAPP_ENV=staging\n", path.display()),
    );

    dotenv_cmd(&dir)
        .args(["check", "redis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("environment: staging"));
}

#[test]
fn test_invalid_dotenv_exits_1_without_leaking() {
    let dir = TempDir::new().unwrap();
    let secret_value = "supersecret_db_password_12345";
    write_config(
        &dir,
        ".env",
        &format!("DB_PASSWORD={secret_value}\nINVALID_LINE"),
    );

    let output = dotenv_cmd(&dir)
        .args(["env", "redis"])
        .output()
        .expect("Failed to run command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(".env"), "stderr: {stderr}");
    assert!(!stderr.contains(secret_value), "stderr: {stderr}");
}

#[test]
fn test_dotenv_disabled_skips_invalid_file() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, ".env", "INVALID_LINE_WITHOUT_EQUALS");

    dotenv_cmd(&dir)
        .env("DOTENV_DISABLED", "1")
        .args(["env", "redis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("redis.host"));
}
