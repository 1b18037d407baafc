//! Skill entries and their two on-disk projections.
//!
//! Per-tier stores hold the enriched shape (identifier, tier, date stamp,
//! description). The combined store holds the bare shape (name,
//! classification, score). Both are views of the one [`Entry`] type.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ident::format_id;
use super::score::Score;
use super::tier::Tier;

/// Date stamp format used by `updated`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// One skill record as stored in a per-tier file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Absent in some hand-edited stores; the file still decides the tier.
    #[serde(rename = "rarity", default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_type: Option<String>,
    pub score: Score,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Keys this version does not know about, kept as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Entry {
    /// A fresh entry with no identifier, stamp or classification.
    pub fn new(tier: Tier, name: impl Into<String>, score: Score) -> Self {
        Self {
            id: None,
            name: name.into(),
            tier: Some(tier),
            updated: None,
            check_type: None,
            score,
            description: None,
            extra: BTreeMap::new(),
        }
    }

    /// Build the enriched entry created for slot `sequence` of `tier`.
    ///
    /// `check_type` is kept only when non-empty; description starts empty.
    #[must_use]
    pub fn created(
        tier: Tier,
        sequence: u32,
        name: &str,
        check_type: Option<&str>,
        score: Score,
        today: NaiveDate,
    ) -> Self {
        Self {
            id: Some(format_id(tier, sequence)),
            updated: Some(format_date(today)),
            check_type: check_type
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            description: Some(String::new()),
            ..Self::new(tier, name, score)
        }
    }

    /// Regenerate the enriched shape from a combined-store entry.
    #[must_use]
    pub fn from_bare(bare: &BareEntry, tier: Tier, sequence: u32, today: NaiveDate) -> Self {
        Self::created(
            tier,
            sequence,
            &bare.name,
            bare.check_type.as_deref(),
            bare.score.clone(),
            today,
        )
    }

    /// Project onto the combined-store shape, dropping enriched-only fields.
    #[must_use]
    pub fn to_bare(&self) -> BareEntry {
        BareEntry {
            name: self.name.clone(),
            check_type: self
                .check_type
                .as_ref()
                .filter(|value| !value.is_empty())
                .cloned(),
            score: self.score.clone(),
        }
    }

    /// Classification, treating an empty string as unclassified.
    #[must_use]
    pub fn classification(&self) -> Option<&str> {
        self.check_type.as_deref().filter(|value| !value.is_empty())
    }
}

/// Legacy combined-store entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BareEntry {
    pub name: String,
    #[serde(
        rename = "check-type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub check_type: Option<String>,
    pub score: Score,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::score::Ratings;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn created_entry_has_enriched_fields() {
        let entry = Entry::created(Tier::Golden, 1, "Sprint Master", Some("Sprint"), Score::Flat(5), today());
        assert_eq!(entry.id.as_deref(), Some("golden_001"));
        assert_eq!(entry.updated.as_deref(), Some("2024-03-09"));
        assert_eq!(entry.check_type.as_deref(), Some("Sprint"));
        assert_eq!(entry.description.as_deref(), Some(""));
    }

    #[test]
    fn created_entry_drops_empty_check_type() {
        let entry = Entry::created(Tier::Red, 3, "Gate", Some(""), Score::ZERO, today());
        assert_eq!(entry.check_type, None);
    }

    #[test]
    fn enriched_json_uses_store_key_order() {
        let entry = Entry::created(Tier::Golden, 1, "Sprint Master", Some("Sprint"), Score::Flat(5), today());
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"id":"golden_001","name":"Sprint Master","rarity":"golden","updated":"2024-03-09","check_type":"Sprint","score":5,"description":""}"#
        );
    }

    #[test]
    fn unknown_keys_survive_round_trip() {
        let raw = r#"{"id":"blue_001","name":"Focus","rarity":"blue","score":{"base":10},"icon":"focus.png"}"#;
        let entry: Entry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.extra.get("icon").unwrap(), "focus.png");
        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["icon"], "focus.png");
        assert!(back.get("updated").is_none());
    }

    #[test]
    fn to_bare_keeps_only_portable_fields() {
        let mut entry = Entry::created(Tier::Green, 2, "Rising", Some("Turf"), Score::Flat(9), today());
        entry.description = Some("notes".into());
        let bare = entry.to_bare();
        assert_eq!(bare.name, "Rising");
        assert_eq!(bare.check_type.as_deref(), Some("Turf"));
        let json = serde_json::to_string(&bare).unwrap();
        assert_eq!(json, r#"{"name":"Rising","check-type":"Turf","score":9}"#);
    }

    #[test]
    fn to_bare_omits_empty_check_type() {
        let mut entry = Entry::new(Tier::Green, "Plain", Score::Flat(1));
        entry.check_type = Some(String::new());
        assert_eq!(entry.to_bare().check_type, None);
    }

    #[test]
    fn from_bare_regenerates_metadata() {
        let bare = BareEntry {
            name: "Corner".into(),
            check_type: None,
            score: Score::Graded(Ratings {
                good: Some(3),
                ..Ratings::default()
            }),
        };
        let entry = Entry::from_bare(&bare, Tier::Yellow, 12, today());
        assert_eq!(entry.id.as_deref(), Some("yellow_012"));
        assert_eq!(entry.tier, Some(Tier::Yellow));
        assert_eq!(entry.to_bare(), bare);
    }

    #[test]
    fn missing_rarity_reads_and_writes_back_absent() {
        let raw = r#"{"id":"golden_001","name":"Old","score":5}"#;
        let entry: Entry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.tier, None);
        assert_eq!(entry.score, Score::Flat(5));

        let written = serde_json::to_value(&entry).unwrap();
        assert!(written.get("rarity").is_none());
    }
}
