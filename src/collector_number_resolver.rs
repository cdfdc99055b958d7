use log::{error, info, warn};

use crate::cards::card::Card;
use crate::cards::collector_number::CollectorNumber;
use crate::gatherer_quirks::number_increment;

/// Gives every card of an expansion a usable collector number and sorts
/// the cards by it.
///
/// Expansions without numbers are numbered in sort order. Alternate
/// printings sharing both number and name are pushed apart. Equal numbers
/// on differently named cards are only reported.
pub fn resolve_collector_numbers(cards: &mut Vec<Card>, expansion_code: &str) {
    if cards.is_empty() {
        error!("Scrape failed for {}: no cards to number", expansion_code);
        return;
    }

    if cards[0].number.is_empty() {
        info!("{} has no collector numbers, numbering in sort order", expansion_code);
        sort_cards(cards);
        for (i, card) in cards.iter_mut().enumerate() {
            card.number = (i + 1).to_string();
        }
    }

    sort_cards(cards);
    repair_duplicates(cards, expansion_code);
    report_equal_numbers(cards, expansion_code);
}

pub fn sort_cards(cards: &mut [Card]) {
    cards.sort_by(|a, b| a.compare(b));
}

fn repair_duplicates(cards: &mut Vec<Card>, expansion_code: &str) {
    let amount = number_increment(expansion_code);
    let mut i = 1;
    while i < cards.len() {
        let (previous, current) = (&cards[i - 1], &cards[i]);
        let duplicate = !current.number.is_empty()
            && previous.number == current.number
            && previous.name == current.name;
        if !duplicate {
            i += 1;
            continue;
        }

        match CollectorNumber::parse(&current.number).and_then(|n| n.increment(amount)) {
            Some(next) => {
                info!(
                    "{} {}: {} -> {}",
                    expansion_code, current.name, current.number, next
                );
                cards[i].number = next.to_string();
                sort_cards(cards);
                i = (i - 1).max(1);
            }
            None => {
                warn!(
                    "{} {}: cannot move {} off a duplicate number",
                    expansion_code, current.name, current.number
                );
                i += 1;
            }
        }
    }
}

fn report_equal_numbers(cards: &[Card], expansion_code: &str) {
    for pair in cards.windows(2) {
        if !pair[0].number.is_empty() && pair[0].number == pair[1].number {
            warn!(
                "{}: {} and {} share collector number {}",
                expansion_code, pair[0].name, pair[1].name, pair[0].number
            );
        }
    }
}
