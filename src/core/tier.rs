//! Tier and classification vocabulary.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SbError};

/// Rarity tier of a skill. Each tier owns one store file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Ius,
    Golden,
    Yellow,
    Blue,
    Green,
    Red,
    Purple,
}

impl Tier {
    /// All tiers in canonical manifest order.
    pub const ALL: [Self; 7] = [
        Self::Ius,
        Self::Golden,
        Self::Yellow,
        Self::Blue,
        Self::Green,
        Self::Red,
        Self::Purple,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ius => "ius",
            Self::Golden => "golden",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Red => "red",
            Self::Purple => "purple",
        }
    }

    /// Store file name, e.g. `golden.json`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = SbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ius" => Ok(Self::Ius),
            "golden" => Ok(Self::Golden),
            "yellow" => Ok(Self::Yellow),
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            "red" => Ok(Self::Red),
            "purple" => Ok(Self::Purple),
            _ => Err(SbError::UnknownTier(s.to_string())),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run style, distance and terrain tags recognised in `check_type`.
///
/// Stores keep the tag as a plain string; anything outside this list is
/// only a validator warning.
pub const KNOWN_CHECK_TYPES: [&str; 10] = [
    "Front", "Pace", "Late", "End", "Sprint", "Mile", "Medium", "Long", "Turf", "Dirt",
];

#[must_use]
pub fn is_known_check_type(value: &str) -> bool {
    KNOWN_CHECK_TYPES.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Golden".parse::<Tier>().unwrap(), Tier::Golden);
        assert_eq!(" ius ".parse::<Tier>().unwrap(), Tier::Ius);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "silver".parse::<Tier>().unwrap_err();
        assert!(err.to_string().contains("silver"));
    }

    #[test]
    fn display_round_trips() {
        for tier in Tier::ALL {
            assert_eq!(tier.to_string().parse::<Tier>().unwrap(), tier);
        }
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&Tier::Purple).unwrap();
        assert_eq!(json, "\"purple\"");
        let tier: Tier = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(tier, Tier::Red);
    }

    #[test]
    fn check_types_are_case_sensitive() {
        assert!(is_known_check_type("Sprint"));
        assert!(!is_known_check_type("sprint"));
        assert!(!is_known_check_type("Hill"));
    }
}
