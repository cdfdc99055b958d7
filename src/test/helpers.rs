use std::sync::Arc;
use std::time::Duration;

use crate::cards::card::Card;
use crate::gatherer_client::{GathererScraper, RetryingFetcher};

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Talks to a mock server and retries quickly
pub fn gatherer_for(server_url: &str) -> GathererScraper {
    let fetcher = RetryingFetcher::with_base_delay(reqwest::Client::new(), Duration::from_millis(5));
    GathererScraper::new(Arc::new(fetcher), server_url)
}

pub fn card_with_number(name: &str, number: &str, multiverse_id: u32) -> Card {
    let mut card = Card::new(name, "M10", multiverse_id);
    card.number = number.to_string();
    card
}

pub fn card_with_color(name: &str, color: &str, multiverse_id: u32) -> Card {
    let mut card = Card::new(name, "M10", multiverse_id);
    card.color = color.to_string();
    card
}

pub fn basic_forest(multiverse_id: u32) -> Card {
    let mut card = Card::new("Forest", "M10", multiverse_id);
    card.type_line = "Basic Land - Forest".to_string();
    card.color = "L".to_string();
    card
}

pub fn llanowar_elves() -> Card {
    let mut card = card_with_number("Llanowar Elves", "201", 189878);
    card.mana_cost = "{G}".to_string();
    card.cmc = 1;
    card.type_line = "Creature - Elf Druid".to_string();
    card.text = "{T}: Add {G}.".to_string();
    card.color = "G".to_string();
    card.power = 1.0;
    card.toughness = 1.0;
    card
}
