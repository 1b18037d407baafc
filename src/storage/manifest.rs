//! The manifest (`skills_index.json`) listing tiers and their store files.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::layout::anchor;
use super::ordered::OrderedMap;
use super::store::to_json;
use crate::core::entry::format_date;
use crate::core::tier::Tier;
use crate::error::{Result, SbError};
use crate::utils::fs::{read_optional, write_atomic};

pub const MANIFEST_VERSION: &str = "2.0";
pub const DEFAULT_DESCRIPTION: &str =
    "Uma Musume Skills Library - Split by color for easier management";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    /// Tier names in catalogue order.
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub files: OrderedMap<FileRef>,
}

/// Location of one tier store, relative to the manifest's directory.
///
/// Both the plain string form and the `{ "file": ... }` form are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileRef {
    Path(String),
    Entry { file: String },
    /// Anything else; kept so the rest of the manifest stays usable.
    Unusable(Value),
}

impl FileRef {
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Path(path) | Self::Entry { file: path } => Some(path.as_str()),
            Self::Unusable(_) => None,
        }
    }
}

impl Manifest {
    /// Manifest describing every tier stored under `skills_dir`.
    #[must_use]
    pub fn for_tiers(
        manifest_dir: &Path,
        skills_dir: &Path,
        version: &str,
        description: &str,
        today: NaiveDate,
    ) -> Self {
        let files = Tier::ALL
            .iter()
            .map(|tier| {
                let target = skills_dir.join(tier.file_name());
                (tier.as_str().to_string(), FileRef::Path(relative_ref(manifest_dir, &target)))
            })
            .collect();
        Self {
            version: version.to_string(),
            updated: Some(format_date(today)),
            colors: Tier::ALL.iter().map(|tier| tier.as_str().to_string()).collect(),
            description: Some(description.to_string()),
            files,
        }
    }

    /// Resolved store path for a listed tier name, if it has a usable entry.
    #[must_use]
    pub fn resolve(&self, manifest_dir: &Path, color: &str) -> Option<PathBuf> {
        let reference = self.files.get(color)?.path()?;
        Some(anchor(manifest_dir, Path::new(reference)))
    }
}

/// Read a manifest. Missing keys or bad JSON are [`SbError::MalformedManifest`].
pub fn read_manifest(path: &Path) -> Result<Manifest> {
    let raw = read_optional(path)?
        .ok_or_else(|| SbError::MissingInput(path.display().to_string()))?;
    serde_json::from_str(&raw)
        .map_err(|err| SbError::MalformedManifest(format!("{}: {err}", path.display())))
}

pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    write_atomic(path, &to_json(manifest, b"  ")?)?;
    tracing::debug!(path = %path.display(), "wrote manifest");
    Ok(())
}

/// `target` relative to `base` with `/` separators, or absolute if outside it.
fn relative_ref(base: &Path, target: &Path) -> String {
    target.strip_prefix(base).map_or_else(
        |_| target.display().to_string(),
        |relative| {
            relative
                .components()
                .map(|part| part.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        },
    )
}
