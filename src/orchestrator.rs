use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::join_all;
use log::{debug, error, info};
use tokio::sync::Semaphore;

use crate::card_detail_scraper::DetailContext;
use crate::cards::card::Card;
use crate::cards::expansion::{Expansion, Patch};
use crate::collector_number_resolver::resolve_collector_numbers;
use crate::color_identity::compute_color_identities;
use crate::digest::expansion_digest;
use crate::error::ScrapeError;
use crate::gatherer_client::GathererScraper;

/// Told about every card as soon as its details are in
#[cfg_attr(test, mockall::automock)]
pub trait ProgressSink: Send + Sync {
    fn last_processed(&self, label: &str);
}

#[derive(Debug, Default)]
pub struct ScrapeProgress {
    last: Mutex<String>,
}

impl ScrapeProgress {
    pub fn last(&self) -> String {
        lock(&self.last).clone()
    }
}

impl ProgressSink for ScrapeProgress {
    fn last_processed(&self, label: &str) {
        debug!("Processed {}", label);
        *lock(&self.last) = label.to_string();
    }
}

/// Every source id collected by any expansion task
#[derive(Debug, Default)]
pub struct SeenMultiverseIds {
    ids: Mutex<HashSet<u32>>,
}

impl SeenMultiverseIds {
    pub fn add_all(&self, ids: impl IntoIterator<Item = u32>) {
        lock(&self.ids).extend(ids);
    }

    pub fn contains(&self, id: u32) -> bool {
        lock(&self.ids).contains(&id)
    }

    pub fn len(&self) -> usize {
        lock(&self.ids).len()
    }
}

/// A panicking task must not take the shared state down with it
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One expansion to scrape together with the numbers of its previous patch
pub struct ExpansionJob {
    pub expansion: Expansion,
    pub prior_numbers: HashMap<String, String>,
}

/// Runs the whole pipeline for one expansion, one card after the other
pub async fn scrape_expansion(
    gatherer: &GathererScraper,
    job: ExpansionJob,
    progress: &dyn ProgressSink,
    seen: &SeenMultiverseIds,
) -> Result<Patch, ScrapeError> {
    let ExpansionJob {
        mut expansion,
        prior_numbers,
    } = job;
    info!("Scraping {}", expansion.label());

    let listing = gatherer.list_card_stubs(&expansion).await?;
    let context = DetailContext {
        expansion: &expansion,
        name_to_id: &listing.name_to_id,
        prior_numbers: &prior_numbers,
    };

    let mut cards: Vec<Card> = Vec::new();
    for stub in &listing.stubs {
        for card in gatherer.extract_details(stub, &context).await {
            if !cards.contains(&card) {
                cards.push(card);
            }
        }
        progress.last_processed(&format!("{}: {}", expansion.code_gatherer, stub.name));
    }

    if cards.is_empty() {
        return Err(ScrapeError::NothingScraped(expansion.name_gatherer.clone()));
    }
    seen.add_all(cards.iter().map(|card| card.multiverse_id));

    resolve_collector_numbers(&mut cards, &expansion.code_gatherer);
    compute_color_identities(&mut cards);
    expansion.digest = expansion_digest(&cards, &expansion)?;

    info!(
        "Finished {} with {} cards, digest {}",
        expansion.label(),
        cards.len(),
        expansion.digest
    );
    Ok(Patch { expansion, cards })
}

/// Scrapes expansions in parallel, at most `workers` at a time.
///
/// A failing expansion is logged and left out; the others carry on.
pub async fn scrape_expansions(
    gatherer: GathererScraper,
    jobs: Vec<ExpansionJob>,
    workers: usize,
    progress: Arc<dyn ProgressSink>,
    seen: Arc<SeenMultiverseIds>,
) -> Vec<Patch> {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    info!(
        "Scraping {} expansions with {} workers",
        jobs.len(),
        workers.max(1)
    );

    let handles = jobs.into_iter().map(|job| {
        let semaphore_clone = Arc::clone(&semaphore);
        let gatherer = gatherer.clone();
        let progress = Arc::clone(&progress);
        let seen = Arc::clone(&seen);
        let label = job.expansion.label();

        let handle = tokio::spawn(async move {
            // The semaphore is never closed, so a permit always arrives
            let _permit = semaphore_clone.acquire().await.ok();
            scrape_expansion(&gatherer, job, progress.as_ref(), seen.as_ref()).await
        });
        (label, handle)
    });

    let (labels, handles): (Vec<String>, Vec<_>) = handles.unzip();
    let results = join_all(handles).await;

    let mut patches = Vec::new();
    for (label, result) in labels.into_iter().zip(results) {
        match result {
            Ok(Ok(patch)) => patches.push(patch),
            Ok(Err(e)) => error!("Scraping {} failed: {}", label, e),
            Err(e) => error!("Scraping {} panicked: {}", label, e),
        }
    }
    patches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::helpers::{gatherer_for, init};
    use mockito::{Matcher, ServerGuard};

    fn expansion(name: &str, code: &str) -> Expansion {
        Expansion {
            code_gatherer: code.to_string(),
            ..Expansion::new(name)
        }
    }

    fn job(name: &str, code: &str) -> ExpansionJob {
        ExpansionJob {
            expansion: expansion(name, code),
            prior_numbers: HashMap::new(),
        }
    }

    fn search_query(name: &str, page: u32) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), page.to_string()),
            Matcher::UrlEncoded("set".into(), format!("[\"{}\"]", name)),
        ])
    }

    /// Two stubs whose pages both describe Llanowar Elves
    fn serve_magic_2010(server: &mut ServerGuard) -> Vec<mockito::Mock> {
        let mut mocks = vec![
            server
                .mock("GET", "/Pages/Search/Default.aspx")
                .match_query(search_query("Magic 2010", 0))
                .with_status(200)
                .with_body(include_str!("test/search_page_1.html"))
                .create(),
            server
                .mock("GET", "/Pages/Search/Default.aspx")
                .match_query(search_query("Magic 2010", 1))
                .with_status(200)
                .with_body(include_str!("test/search_page_empty.html"))
                .create(),
            server
                .mock("GET", "/Pages/Card/Languages.aspx")
                .match_query(Matcher::Any)
                .with_status(200)
                .with_body(include_str!("test/languages_empty.html"))
                .expect(2)
                .create(),
        ];
        for id in [191062, 190545] {
            mocks.push(
                server
                    .mock("GET", "/Pages/Card/Details.aspx")
                    .match_query(Matcher::UrlEncoded("multiverseid".into(), id.to_string()))
                    .with_status(200)
                    .with_body(include_str!("test/card_details_single.html"))
                    .create(),
            );
        }
        mocks
    }

    #[tokio::test]
    async fn test_scrape_expansion_runs_the_pipeline() {
        init();
        let mut server = std::thread::spawn(|| mockito::Server::new())
            .join()
            .unwrap();
        let mocks = serve_magic_2010(&mut server);

        let mut progress = MockProgressSink::new();
        progress.expect_last_processed().times(2).return_const(());
        let seen = SeenMultiverseIds::default();

        let patch = scrape_expansion(
            &gatherer_for(&server.url()),
            job("Magic 2010", "M10"),
            &progress,
            &seen,
        )
        .await
        .unwrap();

        for mock in &mocks {
            mock.assert();
        }
        let cards = patch
            .cards
            .iter()
            .map(|c| (c.multiverse_id, c.number.as_str(), c.color_identity.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(cards, vec![(190545, "201", "G"), (191062, "202", "G")]);
        assert_eq!(patch.expansion.digest.len(), 64);
        assert_eq!(
            patch.expansion.digest,
            expansion_digest(&patch.cards, &patch.expansion).unwrap()
        );
        assert!(seen.contains(191062));
        assert!(seen.contains(190545));
        assert_eq!(seen.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_expansion_does_not_stop_the_others() {
        init();
        let mut server = std::thread::spawn(|| mockito::Server::new())
            .join()
            .unwrap();
        let _mocks = serve_magic_2010(&mut server);
        let _nowhere = server
            .mock("GET", "/Pages/Search/Default.aspx")
            .match_query(Matcher::UrlEncoded("set".into(), "[\"Nowhere\"]".into()))
            .with_status(200)
            .with_body(include_str!("test/search_page_empty.html"))
            .create();

        let progress = Arc::new(ScrapeProgress::default());
        let seen = Arc::new(SeenMultiverseIds::default());

        let patches = scrape_expansions(
            gatherer_for(&server.url()),
            vec![job("Nowhere", "NOW"), job("Magic 2010", "M10")],
            2,
            progress.clone(),
            seen.clone(),
        )
        .await;

        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].expansion.code_gatherer, "M10");
        assert_eq!(patches[0].cards.len(), 2);
        assert_eq!(progress.last(), "M10: Zombie Goliath");
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_progress_keeps_last_label() {
        let progress = ScrapeProgress::default();
        assert_eq!(progress.last(), "");
        progress.last_processed("M10: Llanowar Elves");
        progress.last_processed("M10: Wrath of God");
        assert_eq!(progress.last(), "M10: Wrath of God");
    }
}
