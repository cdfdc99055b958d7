use std::collections::HashMap;

use log::{debug, error, info};
use scraper::{Html, Selector};

use crate::cards::card::Card;
use crate::cards::expansion::Expansion;
use crate::error::ScrapeError;
use crate::gatherer_client::{multiverse_id_from_href, GathererScraper};
use crate::gatherer_quirks::search_name;

/// Every card an expansion's search lists, before details are known
#[derive(Debug, Default)]
pub struct CardListing {
    pub stubs: Vec<Card>,
    pub name_to_id: HashMap<String, u32>,
}

impl GathererScraper {
    /// Pages through the search results of one expansion.
    ///
    /// The source sometimes serves the last page again instead of an empty
    /// one, so a stub seen before ends the listing just like an empty page
    /// does. The rest of that page is still read.
    pub async fn list_card_stubs(
        &self,
        expansion: &Expansion,
    ) -> Result<CardListing, ScrapeError> {
        let searched_name = search_name(&expansion.name_gatherer);
        let mut listing = CardListing::default();
        let mut page_number = 0;
        let mut complete = false;

        while !complete {
            let url = self.urls.search(searched_name, page_number);
            debug!("Processing link {}", url);
            let page = self.fetch(&url).await;
            let stubs = stubs_on_page(&page.document(), &page.url, &expansion.code_gatherer);
            if stubs.is_empty() {
                break;
            }

            for stub in stubs {
                if listing.stubs.contains(&stub) {
                    if !complete {
                        debug!(
                            "{} repeated on page {} of {}, listing is complete",
                            stub.name, page_number, expansion.name_gatherer
                        );
                    }
                    complete = true;
                    continue;
                }
                listing
                    .name_to_id
                    .entry(stub.name.clone())
                    .or_insert(stub.multiverse_id);
                listing.stubs.push(stub);
            }
            page_number += 1;
        }

        if listing.stubs.is_empty() {
            error!("No cards found for {}", expansion.name_gatherer);
            return Err(ScrapeError::EmptyListing(expansion.name_gatherer.clone()));
        }

        info!(
            "Found {} cards on {} pages for {}",
            listing.stubs.len(),
            page_number,
            expansion.name_gatherer
        );
        Ok(listing)
    }
}

fn stubs_on_page(document: &Html, page_url: &str, expansion_code: &str) -> Vec<Card> {
    let selector = Selector::parse(r#"[id*="cardTitle"]"#).unwrap();

    document
        .select(&selector)
        .filter_map(|element| {
            let name = element.text().collect::<String>().trim().to_string();
            let href = element.value().attr("href")?;
            let id = multiverse_id_from_href(page_url, href)?;
            (!name.is_empty()).then(|| Card::new(&name, expansion_code, id))
        })
        .collect()
}
