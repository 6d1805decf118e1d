//! svc-cli - inspect service configuration files from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Install the tracing subscriber (stderr).
//! - Run the selected command and translate failures into exit codes.
//!
//! Does NOT handle:
//! - Configuration decoding (see `svc_config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide
//!   `CONFIG_PATH` and override variables.
//! - stdout carries only command output; logs and errors go to stderr.

mod args;
mod commands;
mod dispatch;
mod envelope;
mod error;

use args::{Cli, normalize_args};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use svc_config::ConfigLoader;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    if cli.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
