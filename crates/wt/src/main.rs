//! Webtree CLI - website model interpreter.
//!
//! Provides commands for:
//! - `parse`: Interpret a resource tree and write the website JSON
//! - `tree`: Print the page and segment slug hierarchy

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ParseArgs, TreeArgs};
use output::Output;

/// Webtree - website model interpreter.
#[derive(Parser)]
#[command(name = "wt", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret a resource tree and write the website JSON.
    Parse(ParseArgs),
    /// Print the page and segment hierarchy of a resource tree.
    Tree(TreeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Parse(args) => args.input.verbose,
        Commands::Tree(args) => args.input.verbose,
    };

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
        Commands::Parse(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
