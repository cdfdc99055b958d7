use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no cards listed for expansion {0}")]
    EmptyListing(String),

    #[error("no cards could be scraped for expansion {0}")]
    NothingScraped(String),
}
