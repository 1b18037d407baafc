//! skillbook import - Fold a TSV sheet into one tier store

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::catalog::{ImportSummary, import_batch};
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::core::reconcile::MergePolicy;
use crate::core::tier::Tier;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// TSV file to read
    pub tsv: PathBuf,

    /// Tier store to write (ius, golden, yellow, blue, green, red, purple)
    pub tier: Tier,

    /// How rows combine with existing entries (default: [import] default_mode)
    #[arg(long, value_enum)]
    pub mode: Option<MergePolicy>,
}

pub fn run(ctx: &AppContext, args: &ImportArgs) -> Result<()> {
    let policy = args.mode.unwrap_or(ctx.config.import.default_mode);
    let summary = import_batch(&ctx.layout, &args.tsv, args.tier, policy, ctx.today)?;

    if ctx.output_format.is_machine_readable() {
        return emit_json(&summary);
    }
    if !ctx.quiet {
        emit_human(render(ctx, &args.tsv, &summary));
    }
    Ok(())
}

fn render(ctx: &AppContext, tsv: &std::path::Path, summary: &ImportSummary) -> HumanLayout {
    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout
        .title("Import")
        .kv("Source", &tsv.display().to_string())
        .kv("Store", &summary.store.display().to_string())
        .kv("Tier", summary.tier.as_str())
        .kv("Mode", &summary.policy.to_string())
        .kv("Updated", &summary.updated.to_string())
        .kv("Added", &summary.added.to_string())
        .kv("Unchanged", &summary.unchanged.to_string())
        .kv("Total", &summary.total.to_string());

    if !summary.row_warnings.is_empty() {
        layout.blank().section("Skipped rows");
        for warning in &summary.row_warnings {
            layout.bullet(&warning.to_string());
        }
    }
    if !summary.duplicate_rows.is_empty() {
        layout.blank().section("Duplicate names in batch");
        for name in &summary.duplicate_rows {
            layout.bullet(name);
        }
    }
    layout
}
