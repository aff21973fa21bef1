#![deny(missing_docs)]

//! # OData OpenAPI CLI
//!
//! Command Line Interface for the OData to OpenAPI parameter generator.
//!
//! Supported Commands:
//! - `parameters`: Prints the reusable and per-target parameters of a metadata model.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

mod error;
mod parameters;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OData to OpenAPI parameter generator")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate query, key and function parameters for a metadata model.
    Parameters(parameters::ParametersArgs),
}

/// `RUST_LOG` when set, `info` otherwise.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> CliResult<()> {
    setup_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Parameters(args) => parameters::execute(args)?,
    }

    Ok(())
}
