//! docnav CLI - Documentation navigation checker.
//!
//! Provides commands for:
//! - `check`: Validate navigation config files
//! - `pages`: Print the flattened sidebar
//! - `neighbors`: Print previous/next pages around a page
//! - `orphans`: List content files the sidebar never links to

mod commands;
mod content;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, NeighborsArgs, OrphansArgs, PagesArgs};
use output::Output;

/// docnav - Documentation navigation checker.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate navigation config files.
    Check(CheckArgs),
    /// Print the flattened sidebar.
    Pages(PagesArgs),
    /// Print the pages before and after a page.
    Neighbors(NeighborsArgs),
    /// List markdown files not reachable from the sidebar.
    Orphans(OrphansArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Check(args) if args.verbose);

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
        Commands::Check(args) => args.execute(),
        Commands::Pages(args) => args.execute(),
        Commands::Neighbors(args) => args.execute(),
        Commands::Orphans(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
