//! Recon CLI
//!
//! Command-line interface for reviewing and merging staged uploads

use clap::{Parser, Subcommand};
use recon_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "recon")]
#[command(about = "Recon - Staged upload reconciliation", long_about = None)]
struct Cli {
    /// Emit debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare an upload with the persisted record
    Diff(commands::diff::DiffArgs),
    /// Apply confirmed changes and print the updated record with its change log
    Merge(commands::merge::MergeArgs),
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        init(Profile::Development);
    }

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Merge(args) => commands::merge::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
