//! Context-aware error suggestions.
//!
//! Complements the static suggestions in the `codes` module.

use serde_json::Value;

use super::codes::ErrorCode;

/// Generate a context-aware suggestion for an error.
pub fn suggest_for_error(code: ErrorCode, context: Option<&Value>) -> String {
    match code {
        ErrorCode::InputNotFound => suggest_input_not_found(context),
        ErrorCode::IdentifierInvalid => suggest_identifier_invalid(context),
        ErrorCode::TierUnknown => suggest_tier_unknown(context),
        _ => code.suggestion().to_string(),
    }
}

fn suggest_input_not_found(context: Option<&Value>) -> String {
    let Some(path) = context.and_then(|c| c.get("path")).and_then(Value::as_str) else {
        return ErrorCode::InputNotFound.suggestion().to_string();
    };

    if path.ends_with(".tsv") {
        return format!(
            "'{path}' does not exist. Run `skillbook export <tier>` to produce a TSV to edit"
        );
    }
    if path.ends_with("skills_index.json") {
        return format!("'{path}' does not exist. Run `skillbook split` to create the manifest");
    }
    format!(
        "'{path}' does not exist. Check --root, or run `skillbook split` to create per-tier stores"
    )
}

fn suggest_identifier_invalid(context: Option<&Value>) -> String {
    let tier = context.and_then(|c| c.get("tier")).and_then(Value::as_str);
    let id = context.and_then(|c| c.get("id")).and_then(Value::as_str);

    match (tier, id) {
        (Some(tier), Some(id)) => format!(
            "Entry id '{id}' in {tier}.json must look like {tier}_001. Fix it by hand or re-import with --mode replace"
        ),
        _ => ErrorCode::IdentifierInvalid.suggestion().to_string(),
    }
}

fn suggest_tier_unknown(context: Option<&Value>) -> String {
    let tier = context.and_then(|c| c.get("tier")).and_then(Value::as_str);
    match tier {
        Some(tier) => format!(
            "'{tier}' is not a tier. {}",
            ErrorCode::TierUnknown.suggestion()
        ),
        None => ErrorCode::TierUnknown.suggestion().to_string(),
    }
}
