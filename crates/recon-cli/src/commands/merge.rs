//! Merge command
//!
//! Usage: recon merge --uploaded <FILE> --persisted <FILE> --actor <NAME>
//!        [--confirm <KEY>[,<KEY>...]] [--comment <TEXT>]

use crate::commands::input::ReconInputs;
use clap::Args;
use recon_core::diff::compute_diff;
use recon_core::merge::{apply_patch, ConfirmationSet, MergeContext};

#[derive(Debug, Args)]
pub struct MergeArgs {
    #[command(flatten)]
    pub inputs: ReconInputs,

    /// Field keys the reviewer approved
    #[arg(long, value_delimiter = ',')]
    pub confirm: Vec<String>,

    /// Who approved the merge
    #[arg(long)]
    pub actor: String,

    /// Free-text note for the change log
    #[arg(long, default_value = "")]
    pub comment: String,
}

/// Execute merge command
pub fn execute(args: MergeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = args.inputs.load()?;

    let diffs = compute_diff(&loaded.uploaded, Some(&loaded.persisted), &loaded.zone);
    let confirmed: ConfirmationSet = args.confirm.into_iter().collect();
    let ctx = MergeContext {
        uploaded: &loaded.uploaded,
        type_map: &loaded.types,
        zone: &loaded.zone,
        convert_to_local: loaded.convert_to_local,
    };

    let outcome = apply_patch(
        &loaded.persisted,
        &diffs,
        &confirmed,
        &args.actor,
        &args.comment,
        &ctx,
    )?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
