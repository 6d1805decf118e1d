//! Basic end-to-end tests for the configuration loader.
//!
//! Responsibilities:
//! - Test a full load from a file through to a validated environment.
//! - Test failure propagation from each pipeline stage.

use serial_test::serial;
use tempfile::TempDir;

use super::{APP_ENV_VAR, BROKERS_VAR, DbService, TestService, write_config};
use crate::environment::Environment;
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;

fn loader_for(path: std::path::PathBuf) -> ConfigLoader {
    ConfigLoader::new()
        .without_process_args()
        .with_config_path(path)
}

#[test]
#[serial]
fn test_load_prod_environment() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "app.yaml", "env: prod\nbrokers: \"a:9092,b:9092\"\n");

    temp_env::with_vars_unset([APP_ENV_VAR, BROKERS_VAR], || {
        let loaded = loader_for(path.clone()).load::<TestService>().unwrap();
        assert_eq!(loaded.environment, Environment::Prod);
        assert_eq!(loaded.environment.as_str(), "prod");
        assert_eq!(loaded.config.brokers, vec!["a:9092", "b:9092"]);
        assert_eq!(loaded.path(), path);
    });
}

#[test]
#[serial]
fn test_missing_required_port_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "db.yaml", "env: dev\nhost: \"db.local\"\n");

    let err = loader_for(path).load::<DbService>().unwrap_err();
    assert!(
        matches!(err, ConfigError::RequiredFieldMissing(ref field) if field == "port"),
        "unexpected error: {err}"
    );
}

#[test]
#[serial]
fn test_unrecognized_environment_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "app.yaml", "env: Prod\n");

    temp_env::with_vars_unset([APP_ENV_VAR], || {
        let err = loader_for(path.clone()).load::<TestService>().unwrap_err();
        assert!(matches!(err, ConfigError::UnrecognizedEnvironment(ref name) if name == "Prod"));
    });
}

#[test]
#[serial]
fn test_parse_error_names_path() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "broken.yaml", "env: [unterminated\n");

    let err = loader_for(path.clone()).load::<TestService>().unwrap_err();
    match err {
        ConfigError::ConfigFileParse { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ConfigFileParse, got {other}"),
    }
}

#[test]
#[serial]
fn test_unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "app.ini", "env=prod\n");

    let err = loader_for(path).load::<TestService>().unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
}

#[test]
#[serial]
fn test_json_and_toml_sources_load() {
    let dir = TempDir::new().unwrap();
    let json = write_config(&dir, "app.json", r#"{"env": "staging", "brokers": ["x", "y"]}"#);
    let toml = write_config(&dir, "app.toml", "env = \"staging\"\nbrokers = [\"x\", \"y\"]\n");

    temp_env::with_vars_unset([APP_ENV_VAR, BROKERS_VAR], || {
        for path in [&json, &toml] {
            let (config, environment) = loader_for(path.clone())
                .load::<TestService>()
                .unwrap()
                .into_parts();
            assert_eq!(environment, Environment::Staging);
            assert_eq!(config.brokers, vec!["x", "y"]);
        }
    });
}

#[test]
#[serial]
fn test_invalid_value_surfaces_field() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "db.yaml", "env: local\nhost: h\nport: not-a-port\n");

    let err = loader_for(path).load::<DbService>().unwrap_err();
    assert_eq!(err.field(), Some("port"));
}
