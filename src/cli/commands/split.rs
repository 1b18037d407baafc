//! skillbook split - Break the combined store into tier stores

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::catalog::split_combined;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Combined store to read (default: [paths] combined)
    #[arg(long, short)]
    pub input: Option<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &SplitArgs) -> Result<()> {
    let input = args.input.clone().unwrap_or_else(|| ctx.layout.combined.clone());
    let outcome = split_combined(&ctx.layout, &input, ctx.today, &ctx.config.manifest)?;

    if ctx.output_format.is_machine_readable() {
        return emit_json(&outcome);
    }
    if !ctx.quiet {
        let mut layout = HumanLayout::for_format(ctx.output_format);
        layout.title("Split").kv("Source", &input.display().to_string());
        for (count, path) in outcome.counts.iter().zip(&outcome.tier_files) {
            layout.bullet(&format!("{} ({} entries)", path.display(), count.entries));
        }
        for tier in &outcome.missing_tiers {
            layout.bullet(&format!("{tier}: not in combined store, skipped"));
        }
        layout
            .blank()
            .kv("Manifest", &outcome.manifest_path.display().to_string());
        emit_human(layout);
    }
    Ok(())
}
