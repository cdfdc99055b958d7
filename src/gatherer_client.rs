use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use scraper::Html;
use url::Url;

use crate::error::ScrapeError;
use crate::utilities::constants::{
    CARD_DETAILS_PATH, CARD_LANGUAGES_PATH, FRONT_PAGE_PATH, RETRY_BASE_DELAY_MS, SEARCH_PATH,
};

/// A downloaded page. `Html` is not `Send`, so the body is kept as text and
/// parsed where it is read.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub body: String,
}

impl Page {
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Fetching never fails; implementations keep trying until they get a page
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Page;
}

pub struct RetryingFetcher {
    client: reqwest::Client,
    base_delay: Duration,
}

impl RetryingFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_delay(client, Duration::from_millis(RETRY_BASE_DELAY_MS))
    }

    pub fn with_base_delay(client: reqwest::Client, base_delay: Duration) -> Self {
        Self { client, base_delay }
    }

    fn setup_http_headers() -> reqwest::header::HeaderMap {
        let mut header_map = reqwest::header::HeaderMap::new();
        header_map.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("text/html,*/*"),
        );
        header_map.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("Mozilla/5.0 (gatherer_scraper)"),
        );
        header_map
    }

    async fn try_fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let body = self
            .client
            .get(url)
            .headers(Self::setup_http_headers())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

#[async_trait]
impl Fetch for RetryingFetcher {
    async fn fetch(&self, url: &str) -> Page {
        let mut attempt: u32 = 0;
        loop {
            match self.try_fetch(url).await {
                Ok(body) => {
                    debug!("Fetched {}", url);
                    return Page {
                        url: url.to_string(),
                        body,
                    };
                }
                Err(e) => {
                    attempt += 1;
                    let delay = backoff_delay(self.base_delay, attempt);
                    warn!(
                        "Attempt {} for {} failed: {}. Retrying in {:?}",
                        attempt, url, e, delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

/// Linear backoff: the n-th failure waits n times the base delay
pub fn backoff_delay(base_delay: Duration, attempt: u32) -> Duration {
    base_delay.saturating_mul(attempt)
}

/// URL templates of the card database
#[derive(Debug, Clone)]
pub struct GathererUrls {
    base_url: String,
}

impl GathererUrls {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn front_page(&self) -> String {
        format!("{}{}", self.base_url, FRONT_PAGE_PATH)
    }

    pub fn search(&self, expansion_name: &str, page: u32) -> String {
        format!(
            "{}{}?page={}&output=compact&action=advanced&set=%5b%22{}%22%5d&special=true",
            self.base_url,
            SEARCH_PATH,
            page,
            urlencoding::encode(expansion_name)
        )
    }

    pub fn details(&self, multiverse_id: u32) -> String {
        format!(
            "{}{}?multiverseid={}",
            self.base_url, CARD_DETAILS_PATH, multiverse_id
        )
    }

    pub fn languages(&self, multiverse_id: u32, page: u32) -> String {
        let mut url = format!(
            "{}{}?multiverseid={}",
            self.base_url, CARD_LANGUAGES_PATH, multiverse_id
        );
        if page > 0 {
            url.push_str(&format!("&page={}", page));
        }
        url
    }
}

/// What every scraping stage needs: a way to fetch and where to fetch from
#[derive(Clone)]
pub struct GathererScraper {
    pub fetcher: Arc<dyn Fetch>,
    pub urls: GathererUrls,
}

impl GathererScraper {
    pub fn new(fetcher: Arc<dyn Fetch>, base_url: &str) -> Self {
        Self {
            fetcher,
            urls: GathererUrls::new(base_url),
        }
    }

    pub async fn fetch(&self, url: &str) -> Page {
        self.fetcher.fetch(url).await
    }
}

/// Reads the `multiverseid` query parameter of a (possibly relative) link
pub fn multiverse_id_from_href(page_url: &str, href: &str) -> Option<u32> {
    let base = Url::parse(page_url).ok()?;
    let link = base.join(href).ok()?;
    link.query_pairs()
        .find(|(key, _)| key.eq_ignore_ascii_case("multiverseid"))
        .and_then(|(_, value)| value.trim().parse::<u32>().ok())
}
