use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::reconcile::MergePolicy;
use crate::error::{Result, SbError};
use crate::storage::manifest::{DEFAULT_DESCRIPTION, MANIFEST_VERSION};

/// Project config file name, looked up in the catalogue root.
pub const PROJECT_CONFIG_FILE: &str = "skillbook.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub manifest: ManifestConfig,
}

impl Config {
    /// Defaults, then global and project files (or only `explicit_path`),
    /// then `SKILLBOOK_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env_string("SKILLBOOK_CONFIG").map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?
                .ok_or_else(|| SbError::Config(format!("config file not found: {}", path.display())))?;
            config.merge_patch(patch);
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.check_required()?;

        Ok(config)
    }

    /// Keys that may be overridden but never blanked.
    fn check_required(&self) -> Result<()> {
        let required = [
            ("paths.manifest", self.paths.manifest.as_os_str().is_empty()),
            ("paths.combined", self.paths.combined.as_os_str().is_empty()),
            ("manifest.version", self.manifest.version.trim().is_empty()),
        ];
        match required.into_iter().find(|(_, blank)| *blank) {
            Some((key, _)) => Err(SbError::MissingConfig(key.to_string())),
            None => Ok(()),
        }
    }

    /// `~/.config/skillbook/config.toml` on Linux.
    #[must_use]
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skillbook").join("config.toml"))
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match Self::global_path() {
            Some(path) => Self::load_patch(&path),
            None => Ok(None),
        }
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&root.join(PROJECT_CONFIG_FILE))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SbError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| SbError::Config(format!("parse config {}: {err}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.paths {
            self.paths.merge(patch);
        }
        if let Some(patch) = patch.import {
            self.import.merge(patch);
        }
        if let Some(patch) = patch.merge {
            self.merge.merge(patch);
        }
        if let Some(patch) = patch.manifest {
            self.manifest.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup("SKILLBOOK_SKILLS_DIR") {
            self.paths.skills_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("SKILLBOOK_MANIFEST") {
            self.paths.manifest = PathBuf::from(value);
        }
        if let Some(value) = lookup("SKILLBOOK_COMBINED") {
            self.paths.combined = PathBuf::from(value);
        }
        if let Some(value) = lookup("SKILLBOOK_EXPORT_DIR") {
            self.paths.export_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("SKILLBOOK_IMPORT_MODE") {
            self.import.default_mode = value.parse()?;
        }
        if let Some(value) = lookup("SKILLBOOK_MERGE_BACKUP") {
            self.merge.backup = parse_bool(&value);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default)]
    pub skills_dir: PathBuf,
    #[serde(default)]
    pub manifest: PathBuf,
    #[serde(default)]
    pub combined: PathBuf,
    #[serde(default)]
    pub export_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            skills_dir: PathBuf::from("skills"),
            manifest: PathBuf::from("skills_index.json"),
            combined: PathBuf::from("skills_lib.json"),
            export_dir: PathBuf::from("."),
        }
    }
}

impl PathsConfig {
    fn merge(&mut self, patch: PathsPatch) {
        if let Some(value) = patch.skills_dir {
            self.skills_dir = value;
        }
        if let Some(value) = patch.manifest {
            self.manifest = value;
        }
        if let Some(value) = patch.combined {
            self.combined = value;
        }
        if let Some(value) = patch.export_dir {
            self.export_dir = value;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportConfig {
    #[serde(default)]
    pub default_mode: MergePolicy,
}

impl ImportConfig {
    fn merge(&mut self, patch: ImportPatch) {
        if let Some(value) = patch.default_mode {
            self.default_mode = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Copy an existing combined store aside before overwriting it.
    #[serde(default)]
    pub backup: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self { backup: true }
    }
}

impl MergeConfig {
    fn merge(&mut self, patch: MergePatch) {
        if let Some(value) = patch.backup {
            self.backup = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl ManifestConfig {
    fn merge(&mut self, patch: ManifestPatch) {
        if let Some(value) = patch.version {
            self.version = value;
        }
        if let Some(value) = patch.description {
            self.description = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub paths: Option<PathsPatch>,
    pub import: Option<ImportPatch>,
    pub merge: Option<MergePatch>,
    pub manifest: Option<ManifestPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PathsPatch {
    pub skills_dir: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub combined: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ImportPatch {
    pub default_mode: Option<MergePolicy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MergePatch {
    pub backup: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ManifestPatch {
    pub version: Option<String>,
    pub description: Option<String>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
