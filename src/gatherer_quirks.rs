//! Lookup tables for the card database's known inconsistencies.
//!
//! Keyed by expansion code, or by (expansion code, card name). Nothing in
//! here touches the network, so every table can be tested on its own.

/// Expansion that carries hand/life modifiers in the power/toughness row
pub const VANGUARD_CODE: &str = "VNG";

/// Expansion whose "Special" rarity means Timeshifted
pub const TIMESHIFTED_CODE: &str = "TSB";

/// Expansion sorted alphabetically with basic lands last when unnumbered
pub const BATTLE_ROYALE_CODE: &str = "BR";

/// Expansion whose unnumbered cards use the WUBRG colour order
pub const BEATDOWN_CODE: &str = "BD";

pub const NO_COLOR_DISCLOSURE: &str = "(This card has no color.)";

/// The front page and the search backend spell these names differently
const SEARCH_NAME_SUBSTITUTIONS: [(&str, &str); 1] = [(
    "Magic: The Gathering-Conspiracy",
    "Magic: The Gathering—Conspiracy",
)];

/// Meld and double-faced cards the source numbers incorrectly
const MANUAL_COLLECTOR_NUMBERS: [(&str, &str, &str); 9] = [
    ("EMN", "Bruna, the Fading Light", "15a"),
    ("EMN", "Gisela, the Broken Blade", "28a"),
    ("EMN", "Brisela, Voice of Nightmares", "28b"),
    ("EMN", "Graf Rats", "91a"),
    ("EMN", "Midnight Scavengers", "96a"),
    ("EMN", "Chittering Host", "91b"),
    ("SOI", "Hanweir Battlements", "204a"),
    ("EMN", "Hanweir Garrison", "130a"),
    ("EMN", "Hanweir, the Writhing Township", "204b"),
];

/// Alternate-art basics in these expansions are numbered a fixed distance apart
const NUMBER_INCREMENT_QUIRKS: [(&str, u32); 2] = [("ZEN", 20), ("SVT", 43)];

/// Faces sharing a page get `a`, `b`, ... in page order
const FACE_LETTERED_EXPANSIONS: [&str; 4] = ["INV", "APC", "DIS", "PLS"];

/// Alternate printings get a letter from their position among the printing ids
const PRINTING_LETTERED_EXPANSIONS: [&str; 4] = ["FEM", "HML", "ALL", "UST"];

/// Back faces whose colour the source stopped listing
const COLOR_OVERRIDES: [(&str, &str, &str); 34] = [
    ("ORI", "Gideon, Battle-Forged", "W"),
    ("ORI", "Jace, Telepath Unbound", "U"),
    ("ORI", "Liliana, Defiant Necromancer", "B"),
    ("ORI", "Chandra, Roaring Flame", "R"),
    ("ORI", "Nissa, Sage Animist", "G"),
    ("SOI", "Ancient of the Equinox", "G"),
    ("SOI", "Arlinn, Embraced by the Moon", "RG"),
    ("SOI", "Avacyn, the Purifier", "R"),
    ("SOI", "Awoken Horror", "U"),
    ("SOI", "Bearer of Overwhelming Truths", "U"),
    ("SOI", "Branded Howler", "R"),
    ("SOI", "Demon-Possessed Witch", "B"),
    ("SOI", "Flameheart Werewolf", "R"),
    ("SOI", "Gatstaf Ravagers", "R"),
    ("SOI", "Heir to the Night", "B"),
    ("SOI", "Incited Rabble", "R"),
    ("SOI", "Infectious Curse", "B"),
    ("SOI", "Insidious Mist", "U"),
    ("SOI", "Krallenhorde Howler", "G"),
    ("SOI", "Lambholt Butcher", "G"),
    ("SOI", "Lone Wolf of the Natterknolls", "G"),
    ("SOI", "Lunarch Inquisitors", "W"),
    ("SOI", "Moonrise Intruder", "R"),
    ("SOI", "Neck Breaker", "R"),
    ("SOI", "One of the Pack", "G"),
    ("SOI", "Ormendahl, Profane Prince", "B"),
    ("SOI", "Perfected Form", "U"),
    ("SOI", "Persistent Nightmare", "U"),
    ("SOI", "Skin Shedder", "R"),
    ("SOI", "Timber Shredder", "G"),
    ("SOI", "Unimpeded Trespasser", "U"),
    ("SOI", "Vildin-Pack Alpha", "R"),
    ("SOI", "Wayward Disciple", "B"),
    ("SOI", "Werewolf of Ancient Hunger", "G"),
];

/// Cards that are colourless despite a coloured cost
const ALWAYS_COLORLESS: [&str; 1] = ["Ghostfire"];

/// The loyalty row of these planeswalkers is wrong on the source
const LOYALTY_OVERRIDES: [(&str, &str, i32); 1] = [("ORI", "Jace, Telepath Unbound", 5)];

/// Icon names that do not map one-to-one onto a mana symbol
const ICON_SYMBOLS: [(&str, &str); 7] = [
    ("tap", "T"),
    ("untap", "Q"),
    ("snow", "S"),
    ("halfr", "HR"),
    ("halfw", "HW"),
    ("500", "HW"),
    ("infinity", "+oo"),
];

/// Icon names that already are the symbol
const PASSTHROUGH_SYMBOLS: [&str; 45] = [
    "w", "u", "b", "r", "g", "wu", "uw", "ub", "bu", "br", "rb", "rg", "gr", "gw", "wg", "wb",
    "bw", "bg", "gb", "gu", "ug", "ur", "ru", "rw", "wr", "2w", "2u", "2b", "2r", "2g", "pw", "pu",
    "pb", "pr", "pg", "p", "c", "chaos", "z", "y", "x", "h", "pwk", "e", "s",
];

const PHYREXIAN_REVERSED: [&str; 10] = [
    "w2", "u2", "b2", "r2", "g2", "wp", "up", "bp", "rp", "gp",
];

const LANGUAGE_CODES: [(&str, &str); 11] = [
    ("English", "en"),
    ("German", "de"),
    ("French", "fr"),
    ("Japanese", "ja"),
    ("Portuguese (Brazil)", "pt-BR"),
    ("Russian", "ru"),
    ("Chinese Traditional", "zh_HANT"),
    ("Chinese Simplified", "zh_HANS"),
    ("Korean", "ko"),
    ("Italian", "it"),
    ("Spanish", "es"),
];

/// Applied in order, so multi-character sequences come first
pub const NON_ASCII_REPLACEMENTS: [(&str, &str); 27] = [
    ("’", "'"),
    ("‘", "'"),
    ("“", "\""),
    ("”", "\""),
    ("—", "-"),
    ("–", "-"),
    ("−", "-"),
    ("…", "..."),
    ("•", "*"),
    ("®", "(R)"),
    ("™", "(TM)"),
    ("©", "(C)"),
    ("Æ", "Ae"),
    ("æ", "ae"),
    ("â", "a"),
    ("á", "a"),
    ("à", "a"),
    ("é", "e"),
    ("è", "e"),
    ("í", "i"),
    ("ö", "o"),
    ("ó", "o"),
    ("ú", "u"),
    ("û", "u"),
    ("ü", "u"),
    ("ñ", "n"),
    ("\u{a0}", " "),
];

pub fn search_name(expansion_name: &str) -> &str {
    SEARCH_NAME_SUBSTITUTIONS
        .iter()
        .find(|(listed, _)| *listed == expansion_name)
        .map(|(_, searched)| *searched)
        .unwrap_or(expansion_name)
}

pub fn manual_collector_number(expansion: &str, name: &str) -> Option<&'static str> {
    MANUAL_COLLECTOR_NUMBERS
        .iter()
        .find(|(code, card, _)| *code == expansion && *card == name)
        .map(|(_, _, number)| *number)
}

pub fn number_increment(expansion: &str) -> u32 {
    NUMBER_INCREMENT_QUIRKS
        .iter()
        .find(|(code, _)| *code == expansion)
        .map(|(_, amount)| *amount)
        .unwrap_or(1)
}

pub fn letters_faces(expansion: &str) -> bool {
    FACE_LETTERED_EXPANSIONS.contains(&expansion)
}

pub fn letters_printings(expansion: &str) -> bool {
    PRINTING_LETTERED_EXPANSIONS.contains(&expansion)
}

pub fn color_override(expansion: &str, name: &str) -> Option<&'static str> {
    COLOR_OVERRIDES
        .iter()
        .find(|(code, card, _)| *code == expansion && *card == name)
        .map(|(_, _, color)| *color)
}

pub fn is_always_colorless(name: &str) -> bool {
    ALWAYS_COLORLESS.contains(&name)
}

pub fn loyalty_override(expansion: &str, name: &str) -> Option<i32> {
    LOYALTY_OVERRIDES
        .iter()
        .find(|(code, card, _)| *code == expansion && *card == name)
        .map(|(_, _, loyalty)| *loyalty)
}

pub fn mapped_icon_symbol(icon: &str) -> Option<&'static str> {
    ICON_SYMBOLS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(icon))
        .map(|(_, symbol)| *symbol)
}

pub fn is_passthrough_symbol(icon: &str) -> bool {
    let lower = icon.to_lowercase();
    PASSTHROUGH_SYMBOLS.contains(&lower.as_str())
        || PHYREXIAN_REVERSED.contains(&lower.as_str())
        || (!icon.is_empty() && icon.chars().all(|c| c.is_ascii_digit()))
}

pub fn language_code(display: &str) -> Option<&'static str> {
    LANGUAGE_CODES
        .iter()
        .find(|(name, _)| *name == display)
        .map(|(_, code)| *code)
}

/// Sort rank of an unnumbered card's colour.
///
/// Any colour string of more than one letter shares one bucket, markers
/// included, and colourless cards come last.
pub fn color_rank(expansion: &str, color: &str) -> u8 {
    let order: &[char; 7] = if expansion == BEATDOWN_CODE {
        &['W', 'U', 'B', 'R', 'G', 'A', 'L']
    } else {
        &['B', 'U', 'G', 'R', 'W', 'A', 'L']
    };
    let mut letters = color.chars();
    match (letters.next(), letters.next()) {
        (Some(_), Some(_)) => 7,
        (Some(single), None) => order
            .iter()
            .position(|o| *o == single)
            .map(|rank| rank as u8)
            .unwrap_or(8),
        (None, _) => 8,
    }
}
