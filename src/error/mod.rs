//! Error handling for skillbook.
//!
//! This module provides:
//! - [`SbError`]: The main error enum for all catalogue operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestions and context
//! - Suggestion helpers for context-aware error recovery hints

mod codes;
mod suggestions;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;
pub use suggestions::suggest_for_error;

/// Main error type for skillbook operations.
///
/// Every variant is a fatal condition for the operation that raised it.
/// Row-level problems and validation findings are reported as data, not
/// through this type.
#[derive(Error, Debug)]
pub enum SbError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Required input not found: {0}")]
    MissingInput(String),

    #[error("Malformed manifest: {0}")]
    MalformedManifest(String),

    #[error("Invalid identifier '{id}' in {tier} store (expected {tier}_<digits>)")]
    InvalidIdentifier { tier: String, id: String },

    #[error("Invalid tabular input: {0}")]
    InvalidTabular(String),

    #[error("Unknown tier: {0}")]
    UnknownTier(String),

    #[error("Invalid store {path}: {reason}")]
    InvalidStore { path: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl SbError {
    /// Get the error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::SerializationError,
            Self::MissingInput(_) => ErrorCode::InputNotFound,
            Self::MalformedManifest(_) => ErrorCode::ManifestInvalid,
            Self::InvalidIdentifier { .. } => ErrorCode::IdentifierInvalid,
            Self::InvalidTabular(_) => ErrorCode::TabularInvalid,
            Self::UnknownTier(_) => ErrorCode::TierUnknown,
            Self::InvalidStore { .. } => ErrorCode::StoreCorrupted,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
            Self::ValidationFailed(_) => ErrorCode::ValidationFailed,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::MissingInput(path) => Some(serde_json::json!({ "path": path })),
            Self::InvalidIdentifier { tier, id } => {
                Some(serde_json::json!({ "tier": tier, "id": id }))
            }
            Self::UnknownTier(tier) => Some(serde_json::json!({ "tier": tier })),
            Self::InvalidStore { path, reason } => {
                Some(serde_json::json!({ "path": path, "reason": reason }))
            }
            Self::MissingConfig(key) => Some(serde_json::json!({ "config_key": key })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_sb_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "INPUT_NOT_FOUND")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 101)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "catalog", "config")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from an `SbError`.
    #[must_use]
    pub fn from_sb_error(err: &SbError) -> Self {
        let structured = Self::new(err.code(), err.to_string());
        match err.context() {
            Some(context) => structured.with_context(context),
            None => structured,
        }
    }

    /// Add context to this error, regenerating the suggestion.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self.suggestion = suggest_for_error(self.code, self.context.as_ref());
        self
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<&SbError> for StructuredError {
    fn from(err: &SbError) -> Self {
        Self::from_sb_error(err)
    }
}

/// Result type alias using `SbError`.
pub type Result<T> = std::result::Result<T, SbError>;
