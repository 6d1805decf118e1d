//! Check command implementation.
//!
//! Responsibilities:
//! - Load a configuration file through the library loader.
//! - Print the resolved environment, path and decoded section.
//!
//! Does NOT handle:
//! - Exit code mapping (see `error` module).
//!
//! Invariants:
//! - Secret fields are printed as `[REDACTED]`.
//! - Nothing is printed to stdout unless the whole load succeeded.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use svc_config::{ConfigLoader, Environment};
use tracing::info;

use crate::args::OutputFormat;
use crate::envelope::{Envelope, Keyed};

pub fn run<T: Keyed>(config_path: Option<PathBuf>, output: OutputFormat) -> Result<()> {
    // The locator treats a blank flag as unset and falls back to CONFIG_PATH
    let mut loader = ConfigLoader::new().without_process_args();
    if let Some(path) = config_path {
        loader = loader.with_config_path(path);
    }

    let loaded = loader
        .load::<Envelope<T>>()
        .with_context(|| format!("Failed to load {} configuration", T::KEY))?;
    info!(section = T::KEY, "Configuration is valid");

    let report = render::<T>(
        loaded.environment,
        loaded.path(),
        &loaded.config.section,
        output,
    )?;
    print!("{report}");
    Ok(())
}

fn render<T: Keyed>(
    environment: Environment,
    path: &Path,
    section: &T,
    output: OutputFormat,
) -> Result<String> {
    let mut report = Map::new();
    report.insert("environment".into(), Value::from(environment.as_str()));
    report.insert("path".into(), Value::from(path.display().to_string()));
    report.insert(
        T::KEY.into(),
        serde_json::to_value(section).context("Failed to serialize section")?,
    );
    let report = Value::Object(report);

    match output {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&report)?),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&report)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svc_config::sections::{Database, Redis};

    #[test]
    fn test_render_yaml_report() {
        let redis = Redis {
            host: "cache".into(),
            port: 6379,
            db: 2,
        };
        let out = render(
            Environment::Dev,
            Path::new("/etc/svc.yaml"),
            &redis,
            OutputFormat::Yaml,
        )
        .unwrap();
        assert!(out.contains("environment: dev"));
        assert!(out.contains("path: /etc/svc.yaml"));
        assert!(out.contains("redis:"));
        assert!(out.contains("port: 6379"));
    }

    #[test]
    fn test_render_json_redacts_password() {
        let out = render(
            Environment::Prod,
            Path::new("svc.json"),
            &Database::default(),
            OutputFormat::Json,
        )
        .unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["environment"], "prod");
        assert_eq!(value["database"]["password"], "[REDACTED]");
    }
}
