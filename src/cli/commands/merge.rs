//! skillbook merge - Rebuild the combined store from tier stores

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::catalog::{MergeOptions, merge_tiers};
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Manifest to read (default: [paths] manifest)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Combined store to write (default: [paths] combined)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing combined store without a backup copy
    #[arg(long)]
    pub no_backup: bool,
}

pub fn run(ctx: &AppContext, args: &MergeArgs) -> Result<()> {
    let manifest = args.manifest.clone().unwrap_or_else(|| ctx.layout.manifest.clone());
    let options = MergeOptions {
        output: args.output.clone(),
        backup: ctx.config.merge.backup && !args.no_backup,
        now: ctx.now(),
    };
    let outcome = merge_tiers(&ctx.layout, &manifest, &options)?;

    if ctx.output_format.is_machine_readable() {
        return emit_json(&outcome);
    }
    if !ctx.quiet {
        let mut layout = HumanLayout::for_format(ctx.output_format);
        layout.title("Merge").kv("Manifest", &manifest.display().to_string());
        if let Some(backup) = &outcome.backup_path {
            layout.kv("Backup", &backup.display().to_string());
        }
        for count in &outcome.counts {
            layout.bullet(&format!("{}: {} entries", count.tier, count.entries));
        }
        for skipped in &outcome.skipped {
            layout.bullet(&format!("{}: skipped ({})", skipped.name, skipped.reason));
        }
        layout
            .blank()
            .kv("Written", &outcome.combined_path.display().to_string())
            .kv("Tiers", &outcome.counts.len().to_string())
            .kv("Entries", &outcome.total().to_string());
        emit_human(layout);
    }
    Ok(())
}
