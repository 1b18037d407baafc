use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::TempDir;

use crate::core::entry::Entry;
use crate::core::tabular::HEADER;
use crate::core::tier::Tier;
use crate::storage::layout::CatalogLayout;
use crate::storage::store;

/// Date used by fixtures and tests that need a stable clock.
#[must_use]
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default()
}

/// Test fixture providing an isolated catalogue root with default layout.
pub struct CatalogFixture {
    pub temp_dir: TempDir,
    pub layout: CatalogLayout,
}

impl CatalogFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let layout = CatalogLayout::new(temp_dir.path());
        println!("[FIXTURE] Created catalogue root: {:?}", layout.root);
        Self { temp_dir, layout }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.layout.root
    }

    /// Create a file relative to the root.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root().join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!("[FIXTURE] Created file: {:?} ({} bytes)", full_path, content.len());
        full_path
    }

    /// Write a TSV batch; `rows` are tab-joined lines under the standard header.
    pub fn create_tsv(&self, relative_path: &str, rows: &[&str]) -> PathBuf {
        let mut content = HEADER.join("\t");
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        self.create_file(relative_path, &content)
    }

    /// Write a tier store through the real codec.
    pub fn create_tier(&self, tier: Tier, entries: &[Entry]) -> PathBuf {
        let path = self.layout.tier_path(tier);
        store::write_tier(&path, entries).expect("Failed to write tier store");
        path
    }

    pub fn read_tier(&self, tier: Tier) -> Vec<Entry> {
        store::read_tier(&self.layout.tier_path(tier)).expect("Failed to read tier store")
    }

    pub fn read_json(&self, path: &Path) -> serde_json::Value {
        let raw = std::fs::read_to_string(path).expect("Failed to read file");
        serde_json::from_str(&raw).expect("Failed to parse JSON")
    }
}

impl Default for CatalogFixture {
    fn default() -> Self {
        Self::new()
    }
}
