use serde::{Deserialize, Serialize};

use super::card::Card;

/// One named release. Everything except `name_gatherer` and `digest` is
/// curated by hand in the expansions file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expansion {
    pub name_gatherer: String,
    pub code_gatherer: String,
    pub code_mtgi: String,
    pub name_tcgp: String,
    pub name_mkm: String,
    pub release_timestamp: i64,
    pub can_be_foil: bool,
    pub is_online_only: bool,
    pub border_color: String,
    pub digest: String,
    pub expansion_image_urls: Vec<String>,
}

impl Expansion {
    pub fn new(name_gatherer: &str) -> Self {
        Self {
            name_gatherer: name_gatherer.to_string(),
            ..Self::default()
        }
    }

    /// Only expansions with a curated code can be written as a patch
    pub fn is_scraped(&self) -> bool {
        !self.code_gatherer.trim().is_empty()
    }

    pub fn with_digest_cleared(&self) -> Self {
        Self {
            digest: String::new(),
            ..self.clone()
        }
    }

    pub fn label(&self) -> String {
        format!("{}: {}", self.code_gatherer, self.name_gatherer)
    }
}

/// The per-expansion output file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patch {
    pub expansion: Expansion,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub code: String,
    pub url: String,
    pub digest: String,
    pub expansion_image_urls: Vec<String>,
}

impl ManifestEntry {
    pub fn new(expansion: &Expansion, patch_url: &str, file_name: &str) -> Self {
        Self {
            name: expansion.name_gatherer.clone(),
            code: expansion.code_gatherer.clone(),
            url: format!("{}/{}", patch_url.trim_end_matches('/'), file_name),
            digest: expansion.digest.clone(),
            expansion_image_urls: expansion.expansion_image_urls.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub timestamp: i64,
    pub patches: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(timestamp: i64, mut patches: Vec<ManifestEntry>) -> Self {
        patches.sort_by(|a, b| a.name.cmp(&b.name));
        Self { timestamp, patches }
    }
}
