//! Per-tier sequential identifiers (`golden_001`, `golden_002`, ...).

use super::entry::Entry;
use super::tier::Tier;
use crate::error::{Result, SbError};

/// Format an identifier. Sequences past 999 widen instead of wrapping.
#[must_use]
pub fn format_id(tier: Tier, sequence: u32) -> String {
    format!("{}_{sequence:03}", tier.as_str())
}

/// Parse the numeric suffix of `<tier>_<digits>`.
///
/// Returns `None` when the prefix is not this tier or the suffix is not a
/// plain run of ASCII digits.
#[must_use]
pub fn parse_id(tier: Tier, id: &str) -> Option<u32> {
    let digits = id.strip_prefix(tier.as_str())?.strip_prefix('_')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// One past the highest sequence carried by `entries`, or 1.
///
/// Entries without an identifier are ignored. A malformed identifier means
/// the store cannot be trusted for allocation and is reported as an error.
pub fn next_sequence(tier: Tier, entries: &[Entry]) -> Result<u32> {
    let mut max = 0u32;
    let mut highest = None;
    for id in entries.iter().filter_map(|entry| entry.id.as_deref()) {
        let sequence = parse_id(tier, id).ok_or_else(|| invalid(tier, id))?;
        if sequence >= max {
            max = sequence;
            highest = Some(id);
        }
    }
    max.checked_add(1)
        .ok_or_else(|| invalid(tier, highest.unwrap_or_default()))
}

/// The sequence after `sequence`, or an error once the suffix space is used up.
pub fn successor(tier: Tier, sequence: u32) -> Result<u32> {
    sequence
        .checked_add(1)
        .ok_or_else(|| invalid(tier, &format_id(tier, sequence)))
}

fn invalid(tier: Tier, id: &str) -> SbError {
    SbError::InvalidIdentifier {
        tier: tier.to_string(),
        id: id.to_string(),
    }
}
