//! docsnap CLI - Documentation snapshot tool.
//!
//! Provides commands for:
//! - `snapshot`: Copy component docs and write their navigation manifests
//! - `components`: List the recognized component subfolders

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::SnapshotArgs;
use output::Output;

/// docsnap - Documentation snapshot tool.
#[derive(Parser)]
#[command(name = "docsnap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Snapshot component docs and navigation into the artifact directory.
    Snapshot(SnapshotArgs),
    /// List recognized component subfolders.
    Components,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Snapshot(args) if args.verbose);

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

    let result = match cli.command {
        Commands::Snapshot(args) => args.execute(),
        Commands::Components => commands::components::execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
