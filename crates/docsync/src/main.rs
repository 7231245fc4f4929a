//! docsync CLI - publish repository documentation to Confluence.
//!
//! Provides commands for:
//! - `sync`: Convert changed documents and update their wiki pages

mod commands;
mod error;
mod filter;
mod output;
mod pandoc;
mod sync;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::SyncArgs;
use output::Output;

/// docsync - publish repository documentation to Confluence.
#[derive(Parser)]
#[command(name = "docsync", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish documentation files to the wiki.
    Sync(SyncArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Sync(args) if args.verbose);

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to INFO
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Sync(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sync_arguments() {
        let cli = Cli::try_parse_from([
            "docsync",
            "sync",
            "README.md",
            "docs/guide.md",
            "--space",
            "DOCS",
            "--verbose",
        ])
        .unwrap();

        let Commands::Sync(args) = cli.command;
        assert!(args.verbose);
    }
}
