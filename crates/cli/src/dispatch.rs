//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//! - Pick the concrete section type for each `SectionKind`.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Process exit codes (see `main()` and `error`).

use anyhow::Result;
use svc_config::sections::{
    Database, Grpc, GrpcClient, GrpcServer, KafkaConsumer, KafkaProducer, KafkaTopics, Redis,
};

use crate::args::{Cli, Commands, OutputFormat, SectionKind};
use crate::commands;
use crate::envelope::Keyed;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check { section } => {
            let target = Check {
                config_path: cli.config_path,
                output: cli.output,
            };
            with_section(section, target)
        }
        Commands::Env { section } => with_section(section, Env),
    }
}

/// A command that is generic over the section it operates on.
trait SectionCommand {
    fn run<T: Keyed>(self) -> Result<()>;
}

struct Check {
    config_path: Option<std::path::PathBuf>,
    output: OutputFormat,
}

impl SectionCommand for Check {
    fn run<T: Keyed>(self) -> Result<()> {
        commands::check::run::<T>(self.config_path, self.output)
    }
}

struct Env;

impl SectionCommand for Env {
    fn run<T: Keyed>(self) -> Result<()> {
        commands::env::run::<T>()
    }
}

fn with_section<C: SectionCommand>(section: SectionKind, command: C) -> Result<()> {
    match section {
        SectionKind::Database => command.run::<Database>(),
        SectionKind::Redis => command.run::<Redis>(),
        SectionKind::KafkaProducer => command.run::<KafkaProducer>(),
        SectionKind::KafkaConsumer => command.run::<KafkaConsumer>(),
        SectionKind::KafkaTopics => command.run::<KafkaTopics>(),
        SectionKind::GrpcServer => command.run::<GrpcServer>(),
        SectionKind::GrpcClient => command.run::<GrpcClient>(),
        SectionKind::Grpc => command.run::<Grpc>(),
    }
}
