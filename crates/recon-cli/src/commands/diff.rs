//! Diff command
//!
//! Usage: recon diff --uploaded <FILE> --persisted <FILE> [--types <FILE>] [--summary]

use crate::commands::input::ReconInputs;
use clap::Args;
use recon_core::diff::{compute_diff, render_review_summary};

#[derive(Debug, Args)]
pub struct DiffArgs {
    #[command(flatten)]
    pub inputs: ReconInputs,

    /// Print a Markdown review table instead of JSON
    #[arg(long)]
    pub summary: bool,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = args.inputs.load()?;

    let diffs = compute_diff(&loaded.uploaded, Some(&loaded.persisted), &loaded.zone);

    if args.summary {
        print!("{}", render_review_summary(&diffs));
    } else {
        println!("{}", serde_json::to_string_pretty(&diffs)?);
    }

    Ok(())
}
