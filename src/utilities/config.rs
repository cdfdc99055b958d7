use std::env;

use log::error;

use super::constants::{EXPANSIONS_FILE, GATHERER_URL, PATCH_DIR, PATCH_URL};

#[derive(Debug, Clone)]
pub struct Config {
    pub gatherer_url: String,
    pub patch_dir: String,
    pub expansions_file: String,
    pub selected_expansions: Vec<String>,
    pub workers: usize,
    pub patch_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gatherer_url: GATHERER_URL.to_string(),
            patch_dir: PATCH_DIR.to_string(),
            expansions_file: EXPANSIONS_FILE.to_string(),
            selected_expansions: Vec::new(),
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            patch_url: PATCH_URL.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.update_from_env();
        config
    }

    fn update_from_env(&mut self) {
        if let Ok(gatherer_url) = env::var("GATHERER_URL") {
            self.gatherer_url = gatherer_url.trim_end_matches('/').to_string();
        }
        if let Ok(patch_dir) = env::var("PATCH_DIR") {
            self.patch_dir = patch_dir;
        }
        if let Ok(expansions_file) = env::var("EXPANSIONS_FILE") {
            self.expansions_file = expansions_file;
        }
        if let Ok(expansions) = env::var("EXPANSIONS") {
            self.selected_expansions = parse_expansion_list(&expansions);
        }
        if let Ok(workers) = env::var("WORKERS") {
            match workers.parse::<usize>() {
                Ok(w) if w > 0 => self.workers = w,
                _ => error!("WORKERS must be a positive number, got '{}'", workers),
            }
        }
        if let Ok(patch_url) = env::var("PATCH_URL") {
            self.patch_url = patch_url;
        }
    }

    /// An empty selection means every scrapeable expansion
    pub fn is_selected(&self, expansion_name: &str) -> bool {
        self.selected_expansions.is_empty()
            || self
                .selected_expansions
                .iter()
                .any(|name| name == expansion_name)
    }
}

/// Expansion names contain commas and colons, so the list is `|` separated
fn parse_expansion_list(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

lazy_static::lazy_static! {
    pub static ref CONFIG: Config = Config::new();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expansion_list() {
        let names = parse_expansion_list("Alpha| Magic: The Gathering-Conspiracy ||Kaladesh, Inventions|");
        assert_eq!(
            names,
            vec![
                "Alpha".to_string(),
                "Magic: The Gathering-Conspiracy".to_string(),
                "Kaladesh, Inventions".to_string()
            ]
        );
    }

    #[test]
    fn test_empty_selection_selects_everything() {
        let config = Config::default();
        assert!(config.is_selected("Zendikar"));

        let config = Config {
            selected_expansions: vec!["Alpha".to_string()],
            ..Config::default()
        };
        assert!(config.is_selected("Alpha"));
        assert!(!config.is_selected("Beta"));
    }
}
