//! Catalogue operations: import, export, validate, split and merge.
//!
//! Each operation reads what it needs, transforms it with the pure logic in
//! [`crate::core`], writes results through [`crate::storage`], and returns a
//! serializable summary for the CLI to render.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ManifestConfig;
use crate::core::entry::Entry;
use crate::core::reconcile::{MergePolicy, reconcile};
use crate::core::tabular::{self, RowWarning};
use crate::core::tier::Tier;
use crate::core::validation::{Finding, ValidationReport};
use crate::error::{Result, SbError};
use crate::storage::layout::CatalogLayout;
use crate::storage::manifest::{Manifest, read_manifest, write_manifest};
use crate::storage::store::{
    CombinedStore, read_combined, read_tier, read_tier_or_empty, write_combined, write_tier,
};
use crate::utils::fs::{backup_file, write_atomic};

/// Entry count for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub tier: Tier,
    pub entries: usize,
}

// =============================================================================
// Import
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub tier: Tier,
    pub policy: MergePolicy,
    pub store: PathBuf,
    pub updated: usize,
    pub added: usize,
    pub unchanged: usize,
    /// Entries in the store after the import.
    pub total: usize,
    pub row_warnings: Vec<RowWarning>,
    pub duplicate_rows: Vec<String>,
}

/// Fold a TSV batch into one tier store.
pub fn import_batch(
    layout: &CatalogLayout,
    tsv: &Path,
    tier: Tier,
    policy: MergePolicy,
    today: NaiveDate,
) -> Result<ImportSummary> {
    let batch = tabular::read(tsv)?;
    debug!(
        tsv = %tsv.display(),
        rows = batch.rows.len(),
        rejected = batch.warnings.len(),
        "parsed batch"
    );

    let store = layout.tier_path(tier);
    let existing = match policy {
        MergePolicy::Replace => Vec::new(),
        MergePolicy::Update | MergePolicy::AddOnly => read_tier_or_empty(&store)?,
    };

    let result = reconcile(tier, policy, existing, &batch.rows, today)?;
    write_tier(&store, &result.entries)?;

    info!(
        %tier,
        %policy,
        updated = result.updated,
        added = result.added,
        unchanged = result.unchanged,
        total = result.entries.len(),
        "import complete"
    );

    Ok(ImportSummary {
        tier,
        policy,
        store,
        updated: result.updated,
        added: result.added,
        unchanged: result.unchanged,
        total: result.entries.len(),
        row_warnings: batch.warnings,
        duplicate_rows: result.duplicate_rows,
    })
}

// =============================================================================
// Export
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub tier: Tier,
    pub path: PathBuf,
    pub entries: usize,
}

/// Write a tier store out as TSV. Defaults to `<export_dir>/<tier>_skills.tsv`.
pub fn export_tier(
    layout: &CatalogLayout,
    tier: Tier,
    output: Option<&Path>,
) -> Result<ExportSummary> {
    let entries = read_tier(&layout.tier_path(tier))?;
    let path = output.map_or_else(|| layout.export_path(tier), Path::to_path_buf);
    write_atomic(&path, &tabular::render(&entries))?;
    info!(%tier, path = %path.display(), entries = entries.len(), "export complete");
    Ok(ExportSummary {
        tier,
        path,
        entries: entries.len(),
    })
}

// =============================================================================
// Validate
// =============================================================================

/// Check every tier store and the manifest. Never fails on content problems;
/// those are findings in the report.
pub fn validate_all(layout: &CatalogLayout) -> Result<ValidationReport> {
    let mut report = ValidationReport::new();

    for tier in Tier::ALL {
        let path = layout.tier_path(tier);
        if let Some(root) = load_json(&path, &tier.file_name(), &mut report) {
            report.check_tier(tier, &root);
        }
    }

    let scope = file_label(&layout.manifest);
    if let Some(root) = load_json(&layout.manifest, &scope, &mut report) {
        report.check_manifest(&scope, &root);
    }

    info!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        tiers = report.tiers.len(),
        "validation complete"
    );
    Ok(report)
}

/// Read and parse a JSON file, recording a finding when that fails.
fn load_json(path: &Path, scope: &str, report: &mut ValidationReport) -> Option<serde_json::Value> {
    if !path.exists() {
        report.push(Finding::error(scope, format!("missing file: {}", path.display())));
        return None;
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            report.push(Finding::error(scope, format!("error reading file: {err}")));
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            report.push(Finding::error(scope, format!("invalid JSON: {err}")));
            None
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

// =============================================================================
// Split
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SplitOutcome {
    pub tier_files: Vec<PathBuf>,
    pub manifest_path: PathBuf,
    pub counts: Vec<TierCount>,
    /// Tiers the combined store did not contain; no file was written for them.
    pub missing_tiers: Vec<Tier>,
}

/// Break the combined store into per-tier stores plus a manifest.
///
/// Every written entry gets a fresh identifier from its position, today's
/// date and an empty description.
pub fn split_combined(
    layout: &CatalogLayout,
    combined: &Path,
    today: NaiveDate,
    manifest: &ManifestConfig,
) -> Result<SplitOutcome> {
    let store = read_combined(combined)?;

    let mut outcome = SplitOutcome {
        tier_files: Vec::new(),
        manifest_path: layout.manifest.clone(),
        counts: Vec::new(),
        missing_tiers: Vec::new(),
    };

    for tier in Tier::ALL {
        let Some(bare) = store.get(tier) else {
            warn!(%tier, "tier not found in combined store");
            outcome.missing_tiers.push(tier);
            continue;
        };
        let entries: Vec<Entry> = (1u32..)
            .zip(bare)
            .map(|(sequence, item)| Entry::from_bare(item, tier, sequence, today))
            .collect();
        let path = layout.tier_path(tier);
        write_tier(&path, &entries)?;
        debug!(%tier, path = %path.display(), entries = entries.len(), "wrote tier");
        outcome.counts.push(TierCount {
            tier,
            entries: entries.len(),
        });
        outcome.tier_files.push(path);
    }

    let index = Manifest::for_tiers(
        layout.manifest_dir(),
        &layout.skills_dir,
        &manifest.version,
        &manifest.description,
        today,
    );
    write_manifest(&layout.manifest, &index)?;

    info!(
        tiers = outcome.counts.len(),
        missing = outcome.missing_tiers.len(),
        manifest = %layout.manifest.display(),
        "split complete"
    );
    Ok(outcome)
}

// =============================================================================
// Merge
// =============================================================================

#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Combined store to write; the layout default when `None`.
    pub output: Option<PathBuf>,
    /// Copy an existing output aside before overwriting it.
    pub backup: bool,
    /// Timestamp for the backup file name.
    pub now: NaiveDateTime,
}

/// A manifest tier that was not merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTier {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeOutcome {
    pub combined_path: PathBuf,
    pub backup_path: Option<PathBuf>,
    pub counts: Vec<TierCount>,
    pub skipped: Vec<SkippedTier>,
}

impl MergeOutcome {
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().map(|count| count.entries).sum()
    }
}

/// Rebuild the combined store from the tier stores a manifest lists.
pub fn merge_tiers(
    layout: &CatalogLayout,
    manifest_path: &Path,
    options: &MergeOptions,
) -> Result<MergeOutcome> {
    let manifest = read_manifest(manifest_path)?;
    let manifest_dir = manifest_path.parent().unwrap_or(layout.root.as_path());
    debug!(version = %manifest.version, tiers = manifest.colors.len(), "read manifest");

    let mut store = CombinedStore::new();
    let mut counts = Vec::new();
    let mut skipped = Vec::new();
    let mut skip = |name: &str, reason: String| {
        warn!(tier = %name, %reason, "skipping tier");
        skipped.push(SkippedTier {
            name: name.to_string(),
            reason,
        });
    };

    for color in &manifest.colors {
        let Ok(tier) = color.parse::<Tier>() else {
            skip(color, "unknown tier".to_string());
            continue;
        };
        if store.get(tier).is_some() {
            skip(color, "listed more than once".to_string());
            continue;
        }
        let Some(path) = manifest.resolve(manifest_dir, color) else {
            skip(color, "no usable file entry in manifest".to_string());
            continue;
        };
        if !path.exists() {
            skip(color, format!("{} not found", path.display()));
            continue;
        }
        let entries = read_tier(&path)?;
        counts.push(TierCount {
            tier,
            entries: entries.len(),
        });
        store.insert(tier, entries.iter().map(Entry::to_bare).collect());
    }

    let combined_path = options.output.clone().unwrap_or_else(|| layout.combined.clone());
    let backup_path = if options.backup {
        backup_file(&combined_path, options.now)?
    } else {
        None
    };
    write_combined(&combined_path, &store)?;

    let outcome = MergeOutcome {
        combined_path,
        backup_path,
        counts,
        skipped,
    };
    info!(
        tiers = outcome.counts.len(),
        entries = outcome.total(),
        skipped = outcome.skipped.len(),
        path = %outcome.combined_path.display(),
        "merge complete"
    );
    Ok(outcome)
}

/// Convenience used by the CLI: fail with [`SbError::ValidationFailed`] when
/// a report carries errors.
pub fn ensure_passed(report: &ValidationReport) -> Result<()> {
    if report.passed() {
        Ok(())
    } else {
        Err(SbError::ValidationFailed(format!(
            "{} error(s), {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        )))
    }
}
