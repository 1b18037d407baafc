//! Where catalogue files live.

use std::path::{Path, PathBuf};

use crate::config::PathsConfig;
use crate::core::tier::Tier;

/// Resolved catalogue paths. Relative config values are anchored at `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLayout {
    pub root: PathBuf,
    pub skills_dir: PathBuf,
    pub manifest: PathBuf,
    pub combined: PathBuf,
    pub export_dir: PathBuf,
}

impl CatalogLayout {
    /// Layout with the default file names under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(root, &PathsConfig::default())
    }

    pub fn from_config(root: impl Into<PathBuf>, paths: &PathsConfig) -> Self {
        let root = root.into();
        Self {
            skills_dir: anchor(&root, &paths.skills_dir),
            manifest: anchor(&root, &paths.manifest),
            combined: anchor(&root, &paths.combined),
            export_dir: anchor(&root, &paths.export_dir),
            root,
        }
    }

    /// `<skills_dir>/<tier>.json`
    #[must_use]
    pub fn tier_path(&self, tier: Tier) -> PathBuf {
        self.skills_dir.join(tier.file_name())
    }

    /// `<export_dir>/<tier>_skills.tsv`
    #[must_use]
    pub fn export_path(&self, tier: Tier) -> PathBuf {
        self.export_dir.join(format!("{}_skills.tsv", tier.as_str()))
    }

    /// Directory manifest file references are relative to.
    #[must_use]
    pub fn manifest_dir(&self) -> &Path {
        self.manifest.parent().unwrap_or(self.root.as_path())
    }
}

/// Join `path` onto `base` unless it is already absolute.
#[must_use]
pub fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else if path.as_os_str().is_empty() || path == Path::new(".") {
        base.to_path_buf()
    } else {
        base.join(path)
    }
}
