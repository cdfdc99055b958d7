use std::collections::HashMap;

use regex::Regex;

use crate::cards::card::Card;
use crate::cards::colour::{colors_in_cost, WUBRG};

lazy_static::lazy_static! {
    static ref REMINDER_TEXT: Regex = Regex::new(r"\([^)]*\)").unwrap();
    static ref SYMBOL: Regex = Regex::new(r"\{[^}]*\}").unwrap();
}

const BASIC_LAND_TYPES: [(&str, char); 5] = [
    ("Plains", 'W'),
    ("Island", 'U'),
    ("Swamp", 'B'),
    ("Mountain", 'R'),
    ("Forest", 'G'),
];

/// Symbols that contain colour letters without being coloured
const COLORLESS_SYMBOLS: [&str; 2] = ["{PWK}", "{CHAOS}"];

/// Fills in the colour identity of every card of a resolved expansion.
///
/// Faces numbered `Na` and `Nb` belong to one card and share the union of
/// their identities.
pub fn compute_color_identities(cards: &mut [Card]) {
    let own = cards.iter().map(own_identity).collect::<Vec<[bool; 5]>>();
    let by_number = cards
        .iter()
        .enumerate()
        .map(|(i, card)| (card.number.clone(), i))
        .collect::<HashMap<String, usize>>();

    for (i, card) in cards.iter_mut().enumerate() {
        let mut identity = own[i];
        if let Some(sibling) = sibling_number(&card.number).and_then(|n| by_number.get(&n)) {
            for (color, present) in identity.iter_mut().enumerate() {
                *present |= own[*sibling][color];
            }
        }
        card.color_identity = as_letters(&identity);
    }
}

fn own_identity(card: &Card) -> [bool; 5] {
    let mut letters: Vec<char> = card
        .color
        .chars()
        .filter(|c| WUBRG.contains(c))
        .collect();
    letters.extend(colors_in_cost(&card.mana_cost));

    let rules_text = REMINDER_TEXT.replace_all(&card.text, "");
    for symbol in SYMBOL.find_iter(&rules_text) {
        let symbol = symbol.as_str();
        if !COLORLESS_SYMBOLS.iter().any(|s| s.eq_ignore_ascii_case(symbol)) {
            letters.extend(colors_in_cost(symbol));
        }
    }

    if card.type_line.to_lowercase().contains("land") {
        letters.extend(
            BASIC_LAND_TYPES
                .iter()
                .filter(|(land_type, _)| card.type_line.contains(land_type))
                .map(|(_, color)| *color),
        );
    }

    let mut identity = [false; 5];
    for (i, color) in WUBRG.iter().enumerate() {
        identity[i] = letters.contains(color);
    }
    identity
}

fn sibling_number(number: &str) -> Option<String> {
    let stem = number.strip_suffix(|c| c == 'a' || c == 'b')?;
    if stem.is_empty() {
        return None;
    }
    let sibling = if number.ends_with('a') { 'b' } else { 'a' };
    Some(format!("{}{}", stem, sibling))
}

fn as_letters(identity: &[bool; 5]) -> String {
    WUBRG
        .iter()
        .zip(identity.iter())
        .filter(|(_, present)| **present)
        .map(|(color, _)| *color)
        .collect()
}
