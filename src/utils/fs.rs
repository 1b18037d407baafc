//! Filesystem utilities.
//!
//! Every catalogue write goes through [`write_atomic`]: the payload is staged
//! in a sibling file and renamed over the target, so readers never observe a
//! half-written store.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::Result;

/// Timestamp suffix for backup copies.
pub const BACKUP_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Read a file to string, returning None if it doesn't exist.
pub fn read_optional(path: impl AsRef<Path>) -> Result<Option<String>> {
    let path = path.as_ref();
    if path.exists() {
        Ok(Some(std::fs::read_to_string(path)?))
    } else {
        Ok(None)
    }
}

/// Replace `path` with `contents`, creating parent directories as needed.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let temp_path = sibling(path, ".tmp");
    std::fs::write(&temp_path, contents)?;
    match std::fs::rename(&temp_path, path) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            std::fs::remove_file(path)?;
            if let Err(err) = std::fs::rename(&temp_path, path) {
                let _ = std::fs::remove_file(&temp_path);
                return Err(err.into());
            }
        }
        Err(err) => {
            let _ = std::fs::remove_file(&temp_path);
            return Err(err.into());
        }
    }
    tracing::trace!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Where a backup of `path` taken at `at` lives.
#[must_use]
pub fn backup_path(path: &Path, at: NaiveDateTime) -> PathBuf {
    sibling(path, &format!(".backup.{}", at.format(BACKUP_STAMP_FORMAT)))
}

/// Copy `path` next to itself as a timestamped backup.
///
/// Returns `None` when there is nothing to back up.
pub fn backup_file(path: &Path, at: NaiveDateTime) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }
    let target = backup_path(path, at);
    std::fs::copy(path, &target)?;
    tracing::debug!(from = %path.display(), to = %target.display(), "backed up file");
    Ok(Some(target))
}

/// `path` with `suffix` appended to its file name.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(12, 30, 5)
            .unwrap()
    }

    // =========================================================================
    // ensure_dir / read_optional tests
    // =========================================================================

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a").join("b").join("c");

        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn read_optional_nonexistent_file() {
        let temp = TempDir::new().unwrap();
        let result = read_optional(temp.path().join("nonexistent.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn read_optional_with_unicode() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("unicode.json");
        std::fs::write(&file, "[\"固有スキル\"]").unwrap();

        let result = read_optional(&file).unwrap();
        assert_eq!(result.as_deref(), Some("[\"固有スキル\"]"));
    }

    // =========================================================================
    // write_atomic tests
    // =========================================================================

    #[test]
    fn write_atomic_creates_parents() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("skills").join("golden.json");

        write_atomic(&file, "[]\n").unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "[]\n");
    }

    #[test]
    fn write_atomic_replaces_and_leaves_no_temp() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("red.json");
        std::fs::write(&file, "old").unwrap();

        write_atomic(&file, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "new");
        assert!(!temp.path().join("red.json.tmp").exists());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    // =========================================================================
    // backup tests
    // =========================================================================

    #[test]
    fn backup_path_appends_timestamp() {
        let path = backup_path(Path::new("/data/skills_lib.json"), noon());
        assert_eq!(path, PathBuf::from("/data/skills_lib.json.backup.20240506_123005"));
    }

    #[test]
    fn backup_copies_existing_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("skills_lib.json");
        std::fs::write(&file, "{}").unwrap();

        let backup = backup_file(&file, noon()).unwrap().unwrap();
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "{}");
        assert!(file.exists());
    }

    #[test]
    fn backup_of_missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        let result = backup_file(&temp.path().join("absent.json"), noon()).unwrap();
        assert!(result.is_none());
    }
}
