//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Accept the single-dash `-config` spelling services use.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not resolve the configuration path (see `svc_config::SourceLocator`).

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use svc_config::constants::CONFIG_FLAG;

#[derive(Parser)]
#[command(name = "svc-cli")]
#[command(about = "Inspect service configuration files", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  svc-cli -config config/prod.yaml check database\n  CONFIG_PATH=config/dev.toml svc-cli check grpc --output json\n  svc-cli env grpc-server\n"
)]
pub struct Cli {
    /// Path to the configuration file.
    ///
    /// Falls back to the CONFIG_PATH environment variable when omitted or blank.
    #[arg(long = CONFIG_FLAG, global = true, value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Output format for `check`
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a configuration file and print the decoded section
    Check {
        /// Section the file carries next to `env`
        #[arg(value_enum)]
        section: SectionKind,
    },

    /// List the override variables a section reads
    Env {
        #[arg(value_enum)]
        section: SectionKind,
    },
}

/// Shipped sections the CLI can check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionKind {
    Database,
    Redis,
    KafkaProducer,
    KafkaConsumer,
    KafkaTopics,
    GrpcServer,
    GrpcClient,
    Grpc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Rewrite `-config` and `-config=<p>` to their double-dash form so clap
/// accepts the spelling used by services. Arguments after `--` are untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let short = format!("-{CONFIG_FLAG}");
    let short_eq = format!("{short}=");
    let mut passthrough = false;

    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    passthrough = true;
                    arg
                }
                Some(s) if s == short || s.starts_with(&short_eq) => format!("-{s}").into(),
                _ => arg,
            }
        })
        .collect()
}
