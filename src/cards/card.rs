use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::collector_number::CollectorNumber;
use super::foreign_printing::ForeignPrinting;
use super::ptl::{NO_LOYALTY, NO_ONE_CARES};
use super::rarity::Rarity;
use crate::gatherer_quirks::{color_rank, BATTLE_ROYALE_CODE};

/// One printed face of a card in one expansion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub mana_cost: String,
    pub cmc: u32,
    pub type_line: String,
    pub text: String,
    pub flavor: String,
    pub expansion: String,
    pub rarity: Rarity,
    pub number: String,
    pub artist: String,
    pub watermark: String,
    pub color: String,
    pub color_identity: String,
    pub multiverse_id: u32,
    pub power: f32,
    pub toughness: f32,
    pub loyalty: i32,
    pub foreign_printings: Vec<ForeignPrinting>,
}

impl Card {
    pub fn new(name: &str, expansion: &str, multiverse_id: u32) -> Self {
        Self {
            name: name.to_string(),
            mana_cost: String::new(),
            cmc: 0,
            type_line: String::new(),
            text: String::new(),
            flavor: String::new(),
            expansion: expansion.to_string(),
            rarity: Rarity::Common,
            number: String::new(),
            artist: String::new(),
            watermark: String::new(),
            color: String::new(),
            color_identity: String::new(),
            multiverse_id,
            power: NO_ONE_CARES,
            toughness: NO_ONE_CARES,
            loyalty: NO_LOYALTY,
            foreign_printings: Vec::new(),
        }
    }

    /// Key used by the prior-version number cache
    pub fn cache_key(&self) -> String {
        format!("{}{}", self.multiverse_id, self.name)
    }

    pub fn is_basic_land(&self) -> bool {
        self.type_line.contains("Basic Land")
    }

    /// Collector number order, then colour bucket and name for cards
    /// without a number. Numbered cards always come first.
    pub fn compare(&self, other: &Self) -> Ordering {
        let numbers = (
            CollectorNumber::parse(&self.number),
            CollectorNumber::parse(&other.number),
        );
        let primary = match numbers {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.compare_unnumbered(other),
        };

        primary
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.multiverse_id.cmp(&other.multiverse_id))
    }

    fn compare_unnumbered(&self, other: &Self) -> Ordering {
        if self.expansion == BATTLE_ROYALE_CODE {
            return self.is_basic_land().cmp(&other.is_basic_land());
        }
        color_rank(&self.expansion, &self.color).cmp(&color_rank(&other.expansion, &other.color))
    }
}

/// Faces of one multi-face card share an id, so the name is part of identity
impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.multiverse_id == other.multiverse_id && self.name == other.name
    }
}

impl Eq for Card {}
