//! Scraping pipeline
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with retry and browser-like headers
//! - A typed view over parsed HTML
//! - Episode link, heading and download link extraction
//! - Batch release classification
//! - Concurrent episode page fan-out and result aggregation

mod classifier;
mod document;
mod fetcher;
mod navigator;
mod orchestrator;

pub use classifier::is_batch;
pub use document::{DocNode, Document, NodeKind};
pub use fetcher::{build_headers, build_http_client, looks_like_html, FetchError, FetchedPage, Fetcher};
pub use navigator::{
    anchor_text, find_download_links, find_entry_anchors, find_preceding_heading, Anchor,
};
pub use orchestrator::{extract_download_links, extract_entries, scrape_secondary_links, Scraper};

use crate::config::Config;
use crate::model::ScrapeResult;
use crate::ScraperError;

/// Runs a single scrape with a freshly built [`Scraper`]
///
/// Long-running callers should build one `Scraper` and reuse it so the
/// HTTP client and worker pool are shared between scrapes.
///
/// # Example
///
/// ```no_run
/// use modpro_scraper::config::Config;
/// use modpro_scraper::pipeline::scrape;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let result = scrape(&Config::default(), "https://modpro.blog/some-show/").await?;
/// println!("{} regular, {} batch", result.regular.len(), result.batch.len());
/// # Ok(())
/// # }
/// ```
pub async fn scrape(config: &Config, url: &str) -> Result<ScrapeResult, ScraperError> {
    let scraper = Scraper::new(config)?;
    Ok(scraper.scrape_main_page(url).await)
}
