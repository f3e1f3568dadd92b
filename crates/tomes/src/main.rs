//! Tomes CLI - localized Markdown topic engine.
//!
//! Provides commands for:
//! - `serve`: Start the HTTP server
//! - `resolve`: Print the document model of a topic
//! - `topics`: List the topics of a language

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ResolveArgs, ServeArgs, TopicsArgs};
use error::CliError;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tomes - localized Markdown topic engine.
#[derive(Parser)]
#[command(name = "tomes", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),
    /// Resolve a topic and print its document model as JSON.
    Resolve(ResolveArgs),
    /// List the topics of a language in navigation order.
    Topics(TopicsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set for serve command
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    match cli.command {
        Commands::Serve(args) => rt.block_on(args.execute(VERSION)),
        Commands::Resolve(args) => rt.block_on(args.execute()),
        Commands::Topics(args) => rt.block_on(args.execute()),
    }
}
