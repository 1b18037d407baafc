//! skillbook export - Write one tier store as a TSV sheet

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::catalog::export_tier;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::core::tier::Tier;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Tier store to read
    pub tier: Tier,

    /// Output file (default: <export_dir>/<tier>_skills.tsv)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &ExportArgs) -> Result<()> {
    let summary = export_tier(&ctx.layout, args.tier, args.output.as_deref())?;

    if ctx.output_format.is_machine_readable() {
        return emit_json(&summary);
    }
    if !ctx.quiet {
        let mut layout = HumanLayout::for_format(ctx.output_format);
        layout
            .title("Export")
            .kv("Tier", summary.tier.as_str())
            .kv("Entries", &summary.entries.to_string())
            .kv("Written", &summary.path.display().to_string());
        emit_human(layout);
    }
    Ok(())
}
