//! Integration tests for the `check` and `env` commands.
//!
//! These tests verify that svc-cli returns the correct exit codes
//! for each failure category and prints decoded sections to stdout.

mod common;

use common::{svc_cmd, write_config};
use predicates::prelude::*;
use tempfile::TempDir;

const REDIS_DOC: &str = "env: dev\nredis:\n  host: cache.local\n  port: 6379\n";

#[test]
fn test_check_success_prints_section() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "svc.yaml", REDIS_DOC);

    svc_cmd()
        .arg("--config")
        .arg(&path)
        .args(["check", "redis"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("environment: dev"))
        .stdout(predicate::str::contains("host: cache.local"))
        .stdout(predicate::str::contains("db: 0"));
}

#[test]
fn test_single_dash_config_flag() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "svc.yaml", REDIS_DOC);

    svc_cmd()
        .arg("-config")
        .arg(&path)
        .args(["check", "redis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("port: 6379"));
}

#[test]
fn test_config_path_env_var_used() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "svc.json",
        r#"{"env": "staging", "redis": {"host": "r", "port": 1}}"#,
    );

    svc_cmd()
        .env("CONFIG_PATH", &path)
        .args(["check", "redis", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""environment": "staging""#));
}

#[test]
fn test_app_env_overrides_document() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "svc.yaml", REDIS_DOC);

    svc_cmd()
        .env("APP_ENV", "prod")
        .arg("--config")
        .arg(&path)
        .args(["check", "redis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("environment: prod"));
}

#[test]
fn test_no_config_source_exits_2() {
    svc_cmd()
        .args(["check", "redis"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("CONFIG_PATH"));
}

#[test]
fn test_missing_file_exits_2() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.yaml");

    svc_cmd()
        .arg("--config")
        .arg(&missing)
        .args(["check", "redis"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("absent.yaml"));
}

#[test]
fn test_blank_flag_falls_back_to_env_var() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "svc.yaml", REDIS_DOC);

    svc_cmd()
        .env("CONFIG_PATH", &path)
        .args(["--config", "  ", "check", "redis"])
        .assert()
        .success();
}

#[test]
fn test_missing_required_field_exits_3() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "svc.yaml", "env: dev\nredis:\n  host: cache\n");

    svc_cmd()
        .arg("--config")
        .arg(&path)
        .args(["check", "redis"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("redis.port"));
}

#[test]
fn test_invalid_value_exits_3() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "svc.toml",
        "env = \"dev\"\n[redis]\nhost = \"cache\"\nport = \"not-a-port\"\n",
    );

    svc_cmd()
        .arg("--config")
        .arg(&path)
        .args(["check", "redis"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not-a-port"));
}

#[test]
fn test_unsupported_extension_exits_3() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "svc.ini", "env=dev\n");

    svc_cmd()
        .arg("--config")
        .arg(&path)
        .args(["check", "redis"])
        .assert()
        .code(3);
}

#[test]
fn test_unrecognized_environment_exits_4() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "svc.yaml",
        "env: production\nredis:\n  host: cache\n  port: 6379\n",
    );

    svc_cmd()
        .arg("--config")
        .arg(&path)
        .args(["check", "redis"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("production"));
}

#[test]
fn test_check_redacts_password() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "svc.yaml",
        "env: local\ndatabase:\n  type: postgres\n  host: db\n  port: 5432\n  name: app\n  user: app\n  password: hunter2\n  migrationPath: /m\n  maxAttempts: 3\n  attemptDelay: 1s\n",
    );

    svc_cmd()
        .arg("--config")
        .arg(&path)
        .args(["check", "database"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[REDACTED]"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_check_grpc_with_port_override() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "svc.yaml",
        "env: dev\ngrpc:\n  server:\n    port: 50051\n  clients:\n    - host: users\n      port: 9000\n",
    );

    svc_cmd()
        .env("GRPC_PORT", "7000")
        .arg("--config")
        .arg(&path)
        .args(["check", "grpc", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""port": 7000"#))
        .stdout(predicate::str::contains(r#""host": "users""#))
        .stdout(predicate::str::contains(r#""gracefulShutdownTimeout": "30s""#));
}

#[test]
fn test_env_lists_override_variables() {
    svc_cmd()
        .args(["env", "grpc-server"])
        .assert()
        .success()
        .stdout(predicate::str::contains("APP_ENV"))
        .stdout(predicate::str::contains("server.port"))
        .stdout(predicate::str::contains("GRPC_PORT"));
}

#[test]
fn test_unknown_section_is_usage_error() {
    svc_cmd()
        .args(["check", "mongo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mongo"));
}
