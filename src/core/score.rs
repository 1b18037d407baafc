//! Score representation and the row codec.
//!
//! A score is stored either as a bare number (one value for the skill) or as
//! a record keyed by race rating. The tabular format always carries the five
//! rating columns; [`decode`] picks the compact shape when it can.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Skill effectiveness score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    /// Single value, used when only `base` is known.
    Flat(i64),
    /// Per-rating values; absent keys mean "not applicable".
    Graded(Ratings),
}

impl Score {
    /// The value stored when a row carries no ratings at all.
    pub const ZERO: Self = Self::Flat(0);
}

impl Default for Score {
    fn default() -> Self {
        Self::ZERO
    }
}

/// The five optional rating values, in fixed key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bad: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrible: Option<i64>,
    /// Keys outside the five ratings, kept as-is. The row format drops them.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Ratings {
    /// Rating keys as they appear on disk and in the TSV header.
    pub const KEYS: [&'static str; 5] = ["base", "good", "average", "bad", "terrible"];

    #[must_use]
    pub const fn values(&self) -> [Option<i64>; 5] {
        [self.base, self.good, self.average, self.bad, self.terrible]
    }

    #[must_use]
    pub const fn from_values(values: [Option<i64>; 5]) -> Self {
        let [base, good, average, bad, terrible] = values;
        Self {
            base,
            good,
            average,
            bad,
            terrible,
            extra: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.base.is_none()
            && self.good.is_none()
            && self.average.is_none()
            && self.bad.is_none()
            && self.terrible.is_none()
    }

    /// True when nothing beyond `base` is set.
    #[must_use]
    pub const fn only_base(&self) -> bool {
        self.good.is_none() && self.average.is_none() && self.bad.is_none() && self.terrible.is_none()
    }
}

/// Build a score from a row's rating columns.
#[must_use]
pub fn decode(ratings: &Ratings) -> Score {
    if ratings.is_empty() {
        return Score::ZERO;
    }
    match ratings.base {
        Some(base) if ratings.only_base() => Score::Flat(base),
        _ => Score::Graded(ratings.clone()),
    }
}

/// Spread a score back over the five rating columns.
#[must_use]
pub fn encode(score: &Score) -> Ratings {
    match score {
        Score::Flat(value) => Ratings {
            base: Some(*value),
            ..Ratings::default()
        },
        Score::Graded(ratings) => Ratings::from_values(ratings.values()),
    }
}
