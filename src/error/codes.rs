//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Catalogue input errors
//! - 3xx: Config errors
//! - 6xx: Storage errors
//! - 8xx: Validation errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Catalogue input errors (1xx)
    // ========================================
    /// E101: A required input file does not exist
    InputNotFound,
    /// E102: Manifest is unreadable or lacks required fields
    ManifestInvalid,
    /// E103: A store identifier does not match `<tier>_<digits>`
    IdentifierInvalid,
    /// E104: TSV header or structure is unusable
    TabularInvalid,
    /// E105: Tier name outside the fixed set
    TierUnknown,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E302: Config file has invalid syntax or values
    ConfigInvalid,
    /// E304: Required config value is missing
    ConfigMissingRequired,

    // ========================================
    // Storage errors (6xx)
    // ========================================
    /// E602: Store file parsed but has the wrong shape
    StoreCorrupted,
    /// E605: JSON encode/decode failure
    SerializationError,

    // ========================================
    // Validation errors (8xx)
    // ========================================
    /// E801: Validator recorded errors
    ValidationFailed,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E906: Filesystem operation failed
    IoError,
}

impl ErrorCode {
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::InputNotFound => 101,
            Self::ManifestInvalid => 102,
            Self::IdentifierInvalid => 103,
            Self::TabularInvalid => 104,
            Self::TierUnknown => 105,

            Self::ConfigInvalid => 302,
            Self::ConfigMissingRequired => 304,

            Self::StoreCorrupted => 602,
            Self::SerializationError => 605,

            Self::ValidationFailed => 801,

            Self::IoError => 906,
        }
    }

    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::InputNotFound => "Check the path. Run `skillbook split` to create per-tier stores from skills_lib.json",
            Self::ManifestInvalid => "Ensure skills_index.json has `version`, `colors` and `files`. Re-run `skillbook split` to regenerate it",
            Self::IdentifierInvalid => "Fix the `id` field by hand so it reads <tier>_<digits>, then retry",
            Self::TabularInvalid => "The first line must be: name, base, good, average, bad, terrible, check_type (tab-separated)",
            Self::TierUnknown => "Use one of: ius, golden, yellow, blue, green, red, purple",
            Self::ConfigInvalid => "Check TOML syntax in skillbook.toml or the SKILLBOOK_* environment variables",
            Self::ConfigMissingRequired => "Set the required value in skillbook.toml or via environment",
            Self::StoreCorrupted => "The store must be a JSON array of skill objects. Run `skillbook validate` for details",
            Self::SerializationError => "The data format may be corrupted. Check input data for validity",
            Self::ValidationFailed => "Review the errors above and fix each entry, then run `skillbook validate` again",
            Self::IoError => "File operation failed. Check path exists and permissions are correct",
        }
    }

    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::IoError)
    }

    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::InputNotFound
            | Self::ManifestInvalid
            | Self::IdentifierInvalid
            | Self::TabularInvalid
            | Self::TierUnknown => "catalog",
            Self::ConfigInvalid | Self::ConfigMissingRequired => "config",
            Self::StoreCorrupted | Self::SerializationError => "storage",
            Self::ValidationFailed => "validation",
            Self::IoError => "internal",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
