//! Tier store and combined store codecs.
//!
//! Tier stores are JSON arrays with 2-space indentation. The combined store
//! is one JSON object keyed by tier with 4-space indentation, the layout
//! older tooling still reads. Non-ASCII text is written unescaped.

use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use super::ordered::OrderedMap;
use crate::core::entry::{BareEntry, Entry};
use crate::core::tier::Tier;
use crate::error::{Result, SbError};
use crate::utils::fs::{read_optional, write_atomic};

const TIER_INDENT: &[u8] = b"  ";
const COMBINED_INDENT: &[u8] = b"    ";

/// Read a tier store. A missing file is [`SbError::MissingInput`].
pub fn read_tier(path: &Path) -> Result<Vec<Entry>> {
    let raw = read_optional(path)?
        .ok_or_else(|| SbError::MissingInput(path.display().to_string()))?;
    let entries: Vec<Entry> =
        serde_json::from_str(&raw).map_err(|err| invalid_store(path, &err))?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "read tier store");
    Ok(entries)
}

/// Read a tier store, treating a missing file as empty.
pub fn read_tier_or_empty(path: &Path) -> Result<Vec<Entry>> {
    if path.exists() {
        read_tier(path)
    } else {
        tracing::debug!(path = %path.display(), "tier store absent, starting empty");
        Ok(Vec::new())
    }
}

pub fn write_tier(path: &Path, entries: &[Entry]) -> Result<()> {
    let payload = to_json(&entries, TIER_INDENT)?;
    write_atomic(path, &payload)?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "wrote tier store");
    Ok(())
}

/// The legacy single-file catalogue: bare entries grouped by tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedStore {
    tiers: Vec<(Tier, Vec<BareEntry>)>,
    /// Top-level keys that are not tier names; ignored on read.
    pub unknown_keys: Vec<String>,
}

impl CombinedStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, tier: Tier) -> Option<&[BareEntry]> {
        self.tiers
            .iter()
            .find(|(t, _)| *t == tier)
            .map(|(_, entries)| entries.as_slice())
    }

    /// Insert or replace a tier. New tiers are appended.
    pub fn insert(&mut self, tier: Tier, entries: Vec<BareEntry>) {
        match self.tiers.iter_mut().find(|(t, _)| *t == tier) {
            Some(slot) => slot.1 = entries,
            None => self.tiers.push((tier, entries)),
        }
    }

    /// Tiers in document order.
    pub fn tiers(&self) -> impl Iterator<Item = Tier> + '_ {
        self.tiers.iter().map(|(tier, _)| *tier)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[BareEntry])> {
        self.tiers
            .iter()
            .map(|(tier, entries)| (*tier, entries.as_slice()))
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.tiers.iter().map(|(_, entries)| entries.len()).sum()
    }

    /// Parse a combined document.
    pub fn from_json(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        let document: OrderedMap<Value> = serde_json::from_str(raw)?;
        let mut store = Self::new();
        for (key, value) in document {
            match key.parse::<Tier>() {
                Ok(tier) => store.insert(tier, serde_json::from_value(value)?),
                Err(_) => store.unknown_keys.push(key),
            }
        }
        Ok(store)
    }

    fn to_document(&self) -> OrderedMap<&[BareEntry]> {
        self.iter()
            .map(|(tier, entries)| (tier.as_str().to_string(), entries))
            .collect()
    }
}

/// Read the combined store. A missing file is [`SbError::MissingInput`].
pub fn read_combined(path: &Path) -> Result<CombinedStore> {
    let raw = read_optional(path)?
        .ok_or_else(|| SbError::MissingInput(path.display().to_string()))?;
    let store = CombinedStore::from_json(&raw).map_err(|err| invalid_store(path, &err))?;
    for key in &store.unknown_keys {
        tracing::warn!(path = %path.display(), key = %key, "ignoring unknown tier in combined store");
    }
    Ok(store)
}

pub fn write_combined(path: &Path, store: &CombinedStore) -> Result<()> {
    let payload = to_json(&store.to_document(), COMBINED_INDENT)?;
    write_atomic(path, &payload)?;
    tracing::debug!(path = %path.display(), entries = store.total(), "wrote combined store");
    Ok(())
}

/// Pretty-print with the given indent and a trailing newline.
pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T, indent: &[u8]) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent));
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|err| SbError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

fn invalid_store(path: &Path, err: &serde_json::Error) -> SbError {
    SbError::InvalidStore {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
