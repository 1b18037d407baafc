//! Merge a parsed TSV batch into a tier's existing entries.
//!
//! Three policies:
//! - [`MergePolicy::Update`]: refresh matched entries, keep the rest, append new names
//! - [`MergePolicy::Replace`]: discard existing entries, rebuild from the batch
//! - [`MergePolicy::AddOnly`]: keep every existing entry untouched, append new names
//!
//! Entries are matched by exact `name`. Existing order is never changed and
//! new entries always land at the end, in batch order.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entry::{Entry, format_date};
use super::ident::{next_sequence, successor};
use super::tabular::TabularRow;
use super::tier::Tier;
use crate::error::Result;

/// How a batch is folded into an existing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Update matched entries and add new ones
    #[default]
    Update,
    /// Replace the whole store with the batch
    Replace,
    /// Only add entries whose name is new
    #[value(name = "add", alias = "add-only")]
    #[serde(rename = "add", alias = "add_only")]
    AddOnly,
}

impl std::str::FromStr for MergePolicy {
    type Err = crate::error::SbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "update" => Ok(Self::Update),
            "replace" => Ok(Self::Replace),
            "add" | "add-only" | "add_only" => Ok(Self::AddOnly),
            _ => Err(crate::error::SbError::Config(format!(
                "invalid merge mode: {s} (expected update, replace, or add)"
            ))),
        }
    }
}

impl std::fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Update => write!(f, "update"),
            Self::Replace => write!(f, "replace"),
            Self::AddOnly => write!(f, "add"),
        }
    }
}

/// Result of a reconciliation: the list to persist plus counts.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    pub entries: Vec<Entry>,
    pub updated: usize,
    pub added: usize,
    pub unchanged: usize,
    /// Names of new rows ignored because an earlier row had the same name.
    pub duplicate_rows: Vec<String>,
}

/// Produce the new entry list for `tier`.
///
/// Fails only when an existing identifier cannot be parsed for allocation.
pub fn reconcile(
    tier: Tier,
    policy: MergePolicy,
    existing: Vec<Entry>,
    batch: &[TabularRow],
    today: NaiveDate,
) -> Result<Reconciliation> {
    match policy {
        MergePolicy::Replace => Ok(replace_all(tier, batch, today)),
        MergePolicy::Update | MergePolicy::AddOnly => merge(tier, policy, existing, batch, today),
    }
}

fn replace_all(tier: Tier, batch: &[TabularRow], today: NaiveDate) -> Reconciliation {
    let entries: Vec<Entry> = (1u32..)
        .zip(batch)
        .map(|(sequence, row)| new_entry(tier, sequence, row, today))
        .collect();
    Reconciliation {
        added: entries.len(),
        entries,
        ..Reconciliation::default()
    }
}

fn merge(
    tier: Tier,
    policy: MergePolicy,
    existing: Vec<Entry>,
    batch: &[TabularRow],
    today: NaiveDate,
) -> Result<Reconciliation> {
    // Past the last suffix, fail only when another new entry needs a slot.
    let mut sequence: Result<u32> = Ok(next_sequence(tier, &existing)?);
    let stamp = format_date(today);

    let mut first_row: HashMap<&str, &TabularRow> = HashMap::new();
    for row in batch {
        first_row.entry(row.name.as_str()).or_insert(row);
    }
    let known: HashSet<String> = existing.iter().map(|entry| entry.name.clone()).collect();

    let mut out = Reconciliation::default();
    for entry in existing {
        match first_row.get(entry.name.as_str()) {
            Some(row) if policy == MergePolicy::Update => {
                out.entries.push(refresh(tier, entry, row, &stamp));
                out.updated += 1;
            }
            _ => {
                out.entries.push(entry);
                out.unchanged += 1;
            }
        }
    }

    let mut appended: HashSet<&str> = HashSet::new();
    for row in batch.iter().filter(|row| !known.contains(&row.name)) {
        if !appended.insert(row.name.as_str()) {
            tracing::warn!(name = %row.name, %tier, "duplicate name in batch; keeping first row");
            out.duplicate_rows.push(row.name.clone());
            continue;
        }
        let current = sequence?;
        out.entries.push(new_entry(tier, current, row, today));
        out.added += 1;
        sequence = successor(tier, current);
    }

    Ok(out)
}

/// Apply a matched row to an existing entry.
///
/// Score is always replaced and a missing tier is filled in. A blank
/// classification never clears an existing one, but an entry that had none
/// gets an explicit empty string.
fn refresh(tier: Tier, mut entry: Entry, row: &TabularRow, stamp: &str) -> Entry {
    entry.tier.get_or_insert(tier);
    entry.updated = Some(stamp.to_string());
    if let Some(check_type) = row.classification() {
        entry.check_type = Some(check_type.to_string());
    } else if entry.check_type.is_none() {
        entry.check_type = Some(String::new());
    }
    entry.score = row.score();
    entry
}

fn new_entry(tier: Tier, sequence: u32, row: &TabularRow, today: NaiveDate) -> Entry {
    Entry::created(tier, sequence, &row.name, row.classification(), row.score(), today)
}
