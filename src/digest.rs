use sha2::{Digest, Sha256};

use crate::cards::card::Card;
use crate::cards::expansion::Expansion;
use crate::error::ScrapeError;

/// Hex SHA-256 over the finished cards, in order, followed by the
/// expansion itself with its digest left empty
pub fn expansion_digest(cards: &[Card], expansion: &Expansion) -> Result<String, ScrapeError> {
    let mut hasher = Sha256::new();
    for card in cards {
        hasher.update(serde_json::to_vec(card)?);
    }
    hasher.update(serde_json::to_vec(&expansion.with_digest_cleared())?);
    Ok(format!("{:x}", hasher.finalize()))
}
