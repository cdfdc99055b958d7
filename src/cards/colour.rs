use crate::gatherer_quirks::{color_override, is_always_colorless, NO_COLOR_DISCLOSURE};

pub const ARTIFACT: char = 'A';
pub const LAND: char = 'L';
pub const COLORLESS: &str = "C";

pub const WUBRG: [char; 5] = ['W', 'U', 'B', 'R', 'G'];

const INDICATOR_WORDS: [(&str, char); 5] = [
    ("White", 'W'),
    ("Blue", 'U'),
    ("Black", 'B'),
    ("Red", 'R'),
    ("Green", 'G'),
];

/// Fields of a face the colour is derived from
#[derive(Debug, Default, Clone, Copy)]
pub struct ColourSource<'a> {
    pub name: &'a str,
    pub expansion: &'a str,
    pub type_line: &'a str,
    pub mana_cost: &'a str,
    pub color_indicator: &'a str,
    pub text: &'a str,
}

/// The artifact and land markers followed by the colour letters in WUBRG order.
///
/// The colour indicator wins over the mana cost. A card without any letter,
/// or one that says it has no colour, is colourless.
pub fn derive_color(source: &ColourSource) -> String {
    if let Some(color) = color_override(source.expansion, source.name) {
        return color.to_string();
    }
    if is_always_colorless(source.name) || source.text.contains(NO_COLOR_DISCLOSURE) {
        return COLORLESS.to_string();
    }

    let colors = if source.color_indicator.trim().is_empty() {
        colors_in_cost(source.mana_cost)
    } else {
        colors_in_indicator(source.color_indicator)
    };

    let mut color = String::new();
    if source.type_line.contains("Artifact") {
        color.push(ARTIFACT);
    }
    if source.type_line.contains("Land") {
        color.push(LAND);
    }
    color.extend(colors);

    if color.is_empty() {
        COLORLESS.to_string()
    } else {
        color
    }
}

/// WUBRG letters appearing anywhere in a symbol string, hybrids included
pub fn colors_in_cost(cost: &str) -> Vec<char> {
    let upper = cost.to_uppercase();
    WUBRG
        .iter()
        .filter(|c| upper.contains(**c))
        .copied()
        .collect()
}

fn colors_in_indicator(indicator: &str) -> Vec<char> {
    WUBRG
        .iter()
        .filter(|c| {
            INDICATOR_WORDS
                .iter()
                .any(|(word, letter)| letter == *c && indicator.contains(word))
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source<'a>(type_line: &'a str, mana_cost: &'a str) -> ColourSource<'a> {
        ColourSource {
            name: "Test Card",
            expansion: "M10",
            type_line,
            mana_cost,
            ..ColourSource::default()
        }
    }

    #[test]
    fn test_basic_land_is_land_only() {
        assert_eq!(derive_color(&source("Basic Land - Forest", "")), "L");
    }

    #[test]
    fn test_colors_from_cost() {
        assert_eq!(derive_color(&source("Creature - Elf Druid", "{G}")), "G");
        assert_eq!(derive_color(&source("Instant", "{2}{R}{W}")), "WR");
        assert_eq!(derive_color(&source("Instant", "{W/U}")), "WU");
        assert_eq!(derive_color(&source("Artifact", "{3}")), "A");
        assert_eq!(derive_color(&source("Sorcery", "{X}{2}")), "C");
    }

    #[test]
    fn test_markers_come_before_colors() {
        assert_eq!(
            derive_color(&source("Artifact Creature - Golem", "{3}{B}")),
            "AB"
        );
        assert_eq!(derive_color(&source("Land Creature - Forest Dryad", "{G}")), "LG");
        assert_eq!(derive_color(&source("Artifact Land", "")), "AL");
    }

    #[test]
    fn test_indicator_wins_over_cost() {
        let card = ColourSource {
            color_indicator: "Green, Blue",
            ..source("Creature - Human Werewolf", "")
        };
        assert_eq!(derive_color(&card), "UG");
    }

    #[test]
    fn test_forced_colorless() {
        let card = ColourSource {
            text: "(This card has no color.)<br>Devoid",
            ..source("Creature - Eldrazi", "{3}{B}")
        };
        assert_eq!(derive_color(&card), "C");

        let ghostfire = ColourSource {
            name: "Ghostfire",
            ..source("Instant", "{2}{R}")
        };
        assert_eq!(derive_color(&ghostfire), "C");
    }

    #[test]
    fn test_override_table() {
        let jace = ColourSource {
            name: "Jace, Telepath Unbound",
            expansion: "ORI",
            ..source("Planeswalker - Jace", "")
        };
        assert_eq!(derive_color(&jace), "U");
    }
}
