use log::warn;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::gatherer_quirks::TIMESHIFTED_CODE;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
    Timeshifted,
    Bonus,
    Other(char),
}

impl Rarity {
    /// Maps the rarity row of a detail page onto a rarity.
    ///
    /// An empty row happens on promotional cards and counts as rare.
    pub fn from_gatherer(raw: &str, expansion: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Rarity::Rare;
        }
        let special = raw.eq_ignore_ascii_case("Special");
        if special && expansion == TIMESHIFTED_CODE {
            return Rarity::Timeshifted;
        }
        if raw.eq_ignore_ascii_case("Land") {
            return Rarity::Common;
        }
        if special {
            return Rarity::Rare;
        }
        if raw.eq_ignore_ascii_case("Bonus") {
            return Rarity::Bonus;
        }

        let code = raw.chars().next().unwrap_or('R');
        let rarity = Rarity::from_code(code);
        if let Rarity::Other(c) = rarity {
            warn!("Unexpected rarity '{}' ({}) in {}", raw, c, expansion);
        }
        rarity
    }

    pub fn from_code(code: char) -> Self {
        match code {
            'C' => Rarity::Common,
            'U' => Rarity::Uncommon,
            'R' => Rarity::Rare,
            'M' => Rarity::Mythic,
            'T' => Rarity::Timeshifted,
            'B' => Rarity::Bonus,
            other => Rarity::Other(other),
        }
    }

    pub fn code(&self) -> char {
        match self {
            Rarity::Common => 'C',
            Rarity::Uncommon => 'U',
            Rarity::Rare => 'R',
            Rarity::Mythic => 'M',
            Rarity::Timeshifted => 'T',
            Rarity::Bonus => 'B',
            Rarity::Other(c) => *c,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Patches carry the one-letter code
impl Serialize for Rarity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_char(self.code())
    }
}

impl<'de> Deserialize<'de> for Rarity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Ok(Rarity::from_code(code)),
            _ => Err(de::Error::custom(format!("invalid rarity code '{}'", s))),
        }
    }
}
