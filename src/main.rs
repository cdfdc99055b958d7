mod card_detail_scraper;
mod card_list_scraper;
mod cards;
mod collector_number_resolver;
mod color_identity;
mod digest;
mod error;
mod expansion_scraper;
mod gatherer_client;
mod gatherer_quirks;
mod orchestrator;
mod test;
mod utilities;

use std::sync::Arc;

use log::{error, info, warn};

use cards::expansion::{Expansion, Manifest, ManifestEntry};
use gatherer_client::{GathererScraper, RetryingFetcher};
use orchestrator::{scrape_expansions, ExpansionJob, ScrapeProgress, SeenMultiverseIds};
use utilities::config::CONFIG;
use utilities::constants::MANIFEST_FILE_NAME;
use utilities::file_management::{
    load_cached_collector_numbers, load_from_json_file, patch_file_name, save_to_file,
};

/// Attaches the hand-curated metadata to the expansions found on the site
fn reconcile_expansions(listed: Vec<Expansion>, curated: &[Expansion]) -> Vec<Expansion> {
    listed
        .into_iter()
        .map(|expansion| {
            curated
                .iter()
                .find(|known| known.name_gatherer == expansion.name_gatherer)
                .cloned()
                .unwrap_or(expansion)
        })
        .collect()
}

fn load_curated_expansions(path: &str) -> Vec<Expansion> {
    match load_from_json_file::<Vec<Expansion>>(path) {
        Ok(expansions) => expansions,
        Err(e) => {
            warn!("Could not read curated expansions from {}: {}", path, e);
            Vec::new()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let start_time = chrono::prelude::Local::now();
    info!("Starting at {}", start_time);

    let fetcher = RetryingFetcher::new(reqwest::Client::new());
    let gatherer = GathererScraper::new(Arc::new(fetcher), &CONFIG.gatherer_url);

    let listed = gatherer.list_expansions().await;
    if listed.is_empty() {
        error!("No expansions found on {}, giving up", CONFIG.gatherer_url);
        return Ok(());
    }

    let curated = load_curated_expansions(&CONFIG.expansions_file);
    let jobs = reconcile_expansions(listed, &curated)
        .into_iter()
        .filter(|expansion| {
            expansion.is_scraped() && CONFIG.is_selected(&expansion.name_gatherer)
        })
        .map(|expansion| ExpansionJob {
            prior_numbers: load_cached_collector_numbers(
                &CONFIG.patch_dir,
                &expansion.code_gatherer,
            ),
            expansion,
        })
        .collect::<Vec<ExpansionJob>>();
    info!("{} expansions selected", jobs.len());

    let progress = Arc::new(ScrapeProgress::default());
    let seen = Arc::new(SeenMultiverseIds::default());
    let patches = scrape_expansions(
        gatherer,
        jobs,
        CONFIG.workers,
        progress.clone(),
        seen.clone(),
    )
    .await;

    let mut entries = Vec::with_capacity(patches.len());
    for patch in &patches {
        let file_name = patch_file_name(&patch.expansion.code_gatherer);
        let path = format!("{}/{}", CONFIG.patch_dir, file_name);
        save_to_file(&path, patch)?;
        entries.push(ManifestEntry::new(&patch.expansion, &CONFIG.patch_url, &file_name));
    }

    let manifest = Manifest::new(chrono::prelude::Local::now().timestamp(), entries);
    let manifest_path = format!("{}/{}", CONFIG.patch_dir, MANIFEST_FILE_NAME);
    save_to_file(&manifest_path, &manifest)?;

    let end_time = chrono::prelude::Local::now();
    info!(
        "Scrape started at: {}. Finished at: {}. Took: {} seconds. {} patches, {} distinct cards, last processed: {}",
        start_time,
        end_time,
        (end_time - start_time).num_seconds(),
        patches.len(),
        seen.len(),
        progress.last()
    );
    Ok(())
}
