//! Catalogue consistency checks.
//!
//! Checks run on raw JSON so that structurally broken stores still produce
//! findings instead of a deserialization error. Reading files is the
//! caller's job; see `catalog::validate_all`.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::ident::format_id;
use super::score::Ratings;
use super::tier::{Tier, is_known_check_type};

/// Severity level for findings
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth a look, does not fail validation
    Warning,
    /// Fails validation
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    /// File the finding belongs to (`golden.json`, `skills_index.json`).
    pub scope: String,
    /// Entry identifier, when the finding is about one entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

impl Finding {
    pub fn error(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            scope: scope.into(),
            subject: None,
            message: message.into(),
        }
    }

    pub fn warning(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(scope, message)
        }
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subject {
            Some(subject) => write!(f, "{} [{subject}]: {}", self.scope, self.message),
            None => write!(f, "{}: {}", self.scope, self.message),
        }
    }
}

/// Entries checked for one tier file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCheck {
    pub tier: Tier,
    pub entries: usize,
}

/// Accumulated findings for a validation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub tiers: Vec<TierCheck>,
}

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no errors were recorded. Warnings do not fail a run.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
        }
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        for finding in findings {
            self.push(finding);
        }
    }

    /// Check a parsed tier store.
    pub fn check_tier(&mut self, tier: Tier, root: &Value) {
        let scope = tier.file_name();
        let Some(items) = root.as_array() else {
            self.push(Finding::error(scope, "root should be an array"));
            return;
        };
        self.extend(check_entries(tier, items));
        self.tiers.push(TierCheck {
            tier,
            entries: items.len(),
        });
    }

    /// Check a parsed manifest.
    pub fn check_manifest(&mut self, scope: &str, root: &Value) {
        self.extend(check_manifest(scope, root));
    }
}

/// Findings for the entries of one tier file.
#[must_use]
pub fn check_entries(tier: Tier, items: &[Value]) -> Vec<Finding> {
    let scope = tier.file_name();
    let mut findings = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, item) in items.iter().enumerate() {
        let Some(fields) = item.as_object() else {
            findings.push(Finding::error(
                &scope,
                format!("entry {} is not an object", index + 1),
            ));
            continue;
        };
        check_entry(tier, index, fields, &mut findings);

        if let Some(name) = fields.get("name").and_then(Value::as_str) {
            if !seen.insert(name) {
                findings.push(Finding::warning(&scope, format!("duplicate skill name '{name}'")));
            }
        }
    }
    findings
}

fn check_entry(tier: Tier, index: usize, fields: &Map<String, Value>, out: &mut Vec<Finding>) {
    let scope = tier.file_name();
    let expected = format_id(tier, u32::try_from(index + 1).unwrap_or(u32::MAX));
    let subject = fields
        .get("id")
        .and_then(Value::as_str)
        .map_or_else(|| format!("{tier}#{}", index + 1), str::to_string);
    let error = |message: String| Finding::error(&scope, message).with_subject(&subject);
    let warning = |message: String| Finding::warning(&scope, message).with_subject(&subject);

    for key in ["id", "name", "rarity", "score"] {
        if !fields.contains_key(key) {
            out.push(error(format!("missing required field '{key}'")));
        }
    }

    match fields.get("id") {
        Some(id) if id.as_str() != Some(expected.as_str()) => {
            out.push(warning(format!("id should be '{expected}' but is {id}")));
        }
        _ => {}
    }

    match fields.get("rarity") {
        Some(rarity) if rarity.as_str() != Some(tier.as_str()) => {
            out.push(error(format!("rarity {rarity} doesn't match file tier '{tier}'")));
        }
        _ => {}
    }

    let check_type = fields.get("check_type").and_then(Value::as_str).unwrap_or_default();
    if !check_type.is_empty() && !is_known_check_type(check_type) {
        out.push(warning(format!("unknown check_type '{check_type}'")));
    }

    if let Some(score) = fields.get("score") {
        out.extend(check_score(tier, score).into_iter().map(warning));
    }

    match fields.get("name") {
        Some(Value::String(name)) if name.trim().is_empty() => {
            out.push(error("empty skill name".to_string()));
        }
        Some(Value::String(_)) | None => {}
        Some(other) => out.push(error(format!("name should be a string, found {other}"))),
    }
}

/// Shape warnings for a score value.
fn check_score(tier: Tier, score: &Value) -> Vec<String> {
    let mut messages = Vec::new();
    match score {
        Value::Object(ratings) if tier != Tier::Ius => {
            let missing: Vec<&str> = Ratings::KEYS
                .into_iter()
                .filter(|key| !ratings.contains_key(*key))
                .collect();
            if !missing.is_empty() {
                messages.push(format!("score missing keys: {}", missing.join(", ")));
            }
            if tier != Tier::Purple {
                for (key, value) in ratings {
                    if value.as_f64().is_some_and(|v| v < 0.0) {
                        messages.push(format!("negative score value {key}={value}"));
                    }
                }
            }
        }
        Value::Number(_) if tier != Tier::Ius => {
            messages.push("non-ius skill has a flat numeric score".to_string());
        }
        _ => {}
    }
    messages
}

/// Findings for a manifest document.
///
/// A missing top-level key stops the check; the rest would only cascade.
#[must_use]
pub fn check_manifest(scope: &str, root: &Value) -> Vec<Finding> {
    let mut findings = Vec::new();
    let Some(fields) = root.as_object() else {
        findings.push(Finding::error(scope, "root should be an object"));
        return findings;
    };

    for key in ["version", "colors", "files"] {
        if !fields.contains_key(key) {
            findings.push(Finding::error(scope, format!("missing required field '{key}'")));
            return findings;
        }
    }

    match fields.get("colors").and_then(Value::as_array) {
        Some(colors) => {
            let listed: BTreeSet<&str> = colors.iter().filter_map(Value::as_str).collect();
            let expected: BTreeSet<&str> = Tier::ALL.iter().map(|tier| tier.as_str()).collect();
            let missing: Vec<&str> = expected.difference(&listed).copied().collect();
            let extra: Vec<&str> = listed.difference(&expected).copied().collect();
            if !missing.is_empty() {
                findings.push(Finding::warning(scope, format!("missing tiers: {}", missing.join(", "))));
            }
            if !extra.is_empty() {
                findings.push(Finding::warning(scope, format!("extra tiers: {}", extra.join(", "))));
            }
        }
        None => findings.push(Finding::error(scope, "'colors' should be an array")),
    }

    match fields.get("files").and_then(Value::as_object) {
        Some(files) => {
            for (tier, reference) in files {
                let usable = match reference {
                    Value::String(_) => true,
                    Value::Object(inner) => inner.get("file").is_some_and(Value::is_string),
                    _ => false,
                };
                if !usable {
                    findings.push(Finding::warning(
                        scope,
                        format!("files entry for '{tier}' is neither a path nor {{\"file\": path}}"),
                    ));
                }
            }
        }
        None => findings.push(Finding::error(scope, "'files' should be an object")),
    }

    findings
}
