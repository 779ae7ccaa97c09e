//! Phasmbase - ghost catalog filter and overlay resolver
//!
//! Command-line front end to the resolution engine: inspect highlights for a
//! set of toggles, replay recorded UI events, and validate data files.

use clap::{Parser, Subcommand};
use phasmbase::cli::{
    CliError, ConfigArgs, ExitCode, InspectArgs, ReplayArgs, TogglesArgs, ValidateArgs,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Phasmbase - ghost catalog filter and overlay resolver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve highlights and visibility for a set of filters
    Inspect(InspectArgs),
    /// Replay an event script against a fresh session
    Replay(ReplayArgs),
    /// Check catalog and mapping files
    Validate(ValidateArgs),
    /// List sidebar toggles
    Toggles(TogglesArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result: Result<(), CliError> = match &cli.command {
        Command::Inspect(args) => args.execute(),
        Command::Replay(args) => args.execute(),
        Command::Validate(args) => args.execute(),
        Command::Toggles(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    match result {
        Ok(()) => std::process::exit(ExitCode::Success.code()),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(err.exit_code().code());
        }
    }
}
