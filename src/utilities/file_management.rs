use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::{info, warn};
use serde::{de::DeserializeOwned, Serialize};

use super::constants::PATCH_FILE_SUFFIX;
use crate::cards::expansion::Patch;
use crate::error::ScrapeError;

pub fn save_to_file<T: Serialize>(path: &str, content: &T) -> Result<(), ScrapeError> {
    // Create all parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, content)?;
    Ok(())
}

pub fn load_from_json_file<T: DeserializeOwned>(path: &str) -> Result<T, ScrapeError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn patch_file_name(expansion_code: &str) -> String {
    format!("{}{}", expansion_code, PATCH_FILE_SUFFIX)
}

/// Collector numbers of the previous run, keyed by source id and name.
///
/// Without a previous patch every number comes from the source again.
pub fn load_cached_collector_numbers(
    patch_dir: &str,
    expansion_code: &str,
) -> HashMap<String, String> {
    let path = format!("{}/{}", patch_dir, patch_file_name(expansion_code));
    match load_from_json_file::<Patch>(&path) {
        Ok(patch) => {
            let numbers = patch
                .cards
                .iter()
                .filter(|card| !card.number.is_empty())
                .map(|card| (card.cache_key(), card.number.clone()))
                .collect::<HashMap<String, String>>();
            info!("Loaded {} collector numbers from {}", numbers.len(), path);
            numbers
        }
        Err(e) => {
            warn!(
                "No previous collector numbers for {} ({}): {}",
                expansion_code, path, e
            );
            HashMap::new()
        }
    }
}
