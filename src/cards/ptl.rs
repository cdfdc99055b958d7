//! Power, toughness and loyalty values.
//!
//! Non-numeric stats are stored as negative sentinels far below anything a
//! printed card carries, so the fields stay numeric.

use log::warn;

pub const STAR: f32 = -1000.0;
pub const ONE_PLUS_STAR: f32 = -1001.0;
pub const TWO_PLUS_STAR: f32 = -1002.0;
pub const SEVEN_MINUS_STAR: f32 = -1003.0;
pub const STAR_SQUARED: f32 = -1004.0;
/// The card has no such stat
pub const NO_ONE_CARES: f32 = -1005.0;
pub const X: f32 = -1006.0;
pub const QUESTION_MARK: f32 = -1007.0;
pub const INFINITY: f32 = -1008.0;

pub const NO_LOYALTY: i32 = NO_ONE_CARES as i32;

pub fn map_ptl(raw: &str) -> f32 {
    let raw = raw.trim();
    match raw {
        "*" => STAR,
        "1+*" => ONE_PLUS_STAR,
        "2+*" => TWO_PLUS_STAR,
        "7-*" => SEVEN_MINUS_STAR,
        "*{^2}" | "*²" => STAR_SQUARED,
        "X" | "x" => X,
        "∞" | "{+oo}" => INFINITY,
        "?" => QUESTION_MARK,
        _ => {
            let halved = raw.replace("{1/2}", ".5");
            match halved.parse::<f32>() {
                Ok(value) => value,
                Err(_) => {
                    warn!("Could not parse power/toughness/loyalty '{}'", raw);
                    0.0
                }
            }
        }
    }
}

/// Loyalty is a whole number; anything else goes through the sentinel table
pub fn map_loyalty(raw: &str) -> i32 {
    let raw = raw.trim();
    if raw.is_empty() {
        return NO_LOYALTY;
    }
    raw.parse::<i32>().unwrap_or_else(|_| map_ptl(raw) as i32)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub power: f32,
    pub toughness: f32,
    pub loyalty: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            power: NO_ONE_CARES,
            toughness: NO_ONE_CARES,
            loyalty: NO_LOYALTY,
        }
    }
}

/// Reads a `power / toughness` row, or a loyalty row when there is no slash
pub fn parse_stats_row(row: &str) -> Stats {
    let row = row.trim();
    if row.is_empty() {
        return Stats::default();
    }
    match split_stats(row) {
        Some((power, toughness)) => Stats {
            power: map_ptl(power),
            toughness: map_ptl(toughness),
            loyalty: NO_LOYALTY,
        },
        None => Stats {
            loyalty: map_loyalty(row),
            ..Stats::default()
        },
    }
}

/// Splits on the first slash outside a symbol, so `3{1/2} / 2{1/2}` works
fn split_stats(row: &str) -> Option<(&str, &str)> {
    let mut depth = 0;
    for (i, c) in row.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            '/' if depth == 0 => return Some((&row[..i], &row[i + 1..])),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_distinct() {
        let sentinels = ["*", "1+*", "2+*", "7-*", "*{^2}", "X", "∞", "?"]
            .iter()
            .map(|raw| map_ptl(raw))
            .collect::<Vec<f32>>();
        for (i, a) in sentinels.iter().enumerate() {
            assert_ne!(*a, NO_ONE_CARES);
            assert!(*a < -99.0);
            for b in sentinels.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_plain_and_half_values() {
        assert_eq!(map_ptl("3"), 3.0);
        assert_eq!(map_ptl(" -1 "), -1.0);
        assert_eq!(map_ptl("{1/2}"), 0.5);
        assert_eq!(map_ptl("3{1/2}"), 3.5);
    }

    #[test]
    fn test_unparseable_value_is_zero() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert_eq!(map_ptl("banana"), 0.0);
    }

    #[test]
    fn test_parse_stats_row() {
        let stats = parse_stats_row("2 / 3");
        assert_eq!((stats.power, stats.toughness), (2.0, 3.0));
        assert_eq!(stats.loyalty, NO_LOYALTY);

        let stats = parse_stats_row("* / 1+*");
        assert_eq!((stats.power, stats.toughness), (STAR, ONE_PLUS_STAR));

        let stats = parse_stats_row("3{1/2} / 2{1/2}");
        assert_eq!((stats.power, stats.toughness), (3.5, 2.5));

        let stats = parse_stats_row("{1/2} / {1/2}");
        assert_eq!((stats.power, stats.toughness), (0.5, 0.5));

        let stats = parse_stats_row("4");
        assert_eq!(stats.loyalty, 4);
        assert_eq!(stats.power, NO_ONE_CARES);

        assert_eq!(parse_stats_row("X").loyalty, X as i32);
        assert_eq!(parse_stats_row(""), Stats::default());
    }
}
