//! Pipeline orchestration
//!
//! This module ties the fetcher, navigator and classifier together:
//! - Fetching and parsing the main page
//! - Building and partitioning episode entries
//! - Fanning out one secondary fetch per entry, bounded by a worker pool
//! - Joining every secondary fetch and writing results back in order

use crate::config::{Config, ScraperConfig};
use crate::model::{DownloadLink, Entry, ScrapeResult, MAIN_PAGE_UNAVAILABLE, NO_EPISODE_LINKS};
use crate::pipeline::classifier::is_batch;
use crate::pipeline::document::Document;
use crate::pipeline::fetcher::Fetcher;
use crate::pipeline::navigator::{find_download_links, find_entry_anchors, find_preceding_heading};
use crate::ScraperError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Runs the scraping pipeline
///
/// A `Scraper` is built once per process and shared between requests. Its
/// worker pool (a semaphore with `workers` permits) bounds the number of
/// episode pages fetched at once across all concurrent scrapes.
pub struct Scraper {
    fetcher: Arc<Fetcher>,
    config: Arc<ScraperConfig>,
    workers: Arc<Semaphore>,
}

impl Scraper {
    /// Creates a scraper from the full configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Scraper)` - Ready to scrape
    /// * `Err(ScraperError)` - The HTTP client or headers could not be built
    pub fn new(config: &Config) -> Result<Self, ScraperError> {
        let fetcher = Fetcher::new(&config.fetcher)?;
        Ok(Self::with_fetcher(fetcher, config.scraper.clone()))
    }

    /// Creates a scraper around an existing fetcher
    pub fn with_fetcher(fetcher: Fetcher, config: ScraperConfig) -> Self {
        let workers = Arc::new(Semaphore::new(config.workers.max(1)));

        Self {
            fetcher: Arc::new(fetcher),
            config: Arc::new(config),
            workers,
        }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Scrapes a main page and every episode page it links to
    ///
    /// # Flow
    ///
    /// 1. Fetch the main page; on failure return an error result
    /// 2. Extract episode entries with headings and batch flags
    /// 3. Return an error result if no entries were found
    /// 4. Partition entries into regular and batch lists
    /// 5. Fetch every episode page concurrently and attach its download links
    ///
    /// Never fails: fetch problems become an `error` field (main page) or an
    /// empty `download_links` list (episode page).
    pub async fn scrape_main_page(&self, url: &str) -> ScrapeResult {
        tracing::info!(url, "Scraping main page");

        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(url, error = %e, "Main page unavailable");
                return ScrapeResult::failed(MAIN_PAGE_UNAVAILABLE);
            }
        };

        let entries = extract_entries(&page.body, &self.config);
        if entries.is_empty() {
            tracing::warn!(url, "No episode links found on main page");
            return ScrapeResult::failed(NO_EPISODE_LINKS);
        }

        let mut result = ScrapeResult::partition(entries);
        tracing::info!(
            url,
            regular = result.regular.len(),
            batch = result.batch.len(),
            "Extracted episode entries"
        );

        self.attach_download_links(&mut result).await;

        let download_count: usize = result
            .regular
            .iter()
            .chain(result.batch.iter())
            .map(|entry| entry.download_links.len())
            .sum();
        tracing::info!(url, downloads = download_count, "Scrape completed");

        result
    }

    /// Fetches every entry's episode page and stores its download links
    ///
    /// Tasks are spawned in entry order (regular, then batch) and joined in
    /// the same order, so each result lands on the entry it was spawned for
    /// regardless of completion order.
    async fn attach_download_links(&self, result: &mut ScrapeResult) {
        let handles: Vec<JoinHandle<Vec<DownloadLink>>> = result
            .regular
            .iter()
            .chain(result.batch.iter())
            .map(|entry| self.spawn_secondary(entry.episode_link.clone()))
            .collect();

        let mut collected = Vec::with_capacity(handles.len());
        for handle in handles {
            let links = match handle.await {
                Ok(links) => links,
                Err(e) => {
                    tracing::warn!(error = %e, "Episode page task failed");
                    Vec::new()
                }
            };
            collected.push(links);
        }

        for (entry, links) in result
            .regular
            .iter_mut()
            .chain(result.batch.iter_mut())
            .zip(collected)
        {
            entry.download_links = links;
        }
    }

    /// Spawns the secondary fetch for one episode page
    fn spawn_secondary(&self, episode_link: String) -> JoinHandle<Vec<DownloadLink>> {
        let fetcher = Arc::clone(&self.fetcher);
        let workers = Arc::clone(&self.workers);
        let prefix = self.config.download_prefix.clone();

        tokio::spawn(async move {
            let Ok(_permit) = workers.acquire_owned().await else {
                return Vec::new();
            };
            scrape_secondary_links(&fetcher, &episode_link, &prefix).await
        })
    }
}

/// Builds entries from a main page body
///
/// Entries are returned in document order, each with an empty download
/// list.
pub fn extract_entries(body: &str, config: &ScraperConfig) -> Vec<Entry> {
    let document = Document::parse(body);

    find_entry_anchors(&document, &config.episode_prefixes)
        .into_iter()
        .map(|anchor| {
            let heading = find_preceding_heading(anchor.node);
            let batch = is_batch(anchor.node, &config.batch_keyword);
            Entry::new(heading, anchor.href, anchor.text, batch)
        })
        .collect()
}

/// Extracts download links from an episode page body
pub fn extract_download_links(body: &str, prefix: &str) -> Vec<DownloadLink> {
    find_download_links(&Document::parse(body), prefix)
}

/// Fetches one episode page and extracts its download links
///
/// A failed fetch yields an empty list.
pub async fn scrape_secondary_links(fetcher: &Fetcher, url: &str, prefix: &str) -> Vec<DownloadLink> {
    match fetcher.fetch(url).await {
        Ok(page) => {
            let links = extract_download_links(&page.body, prefix);
            tracing::debug!(url, count = links.len(), "Extracted download links");
            links
        }
        Err(e) => {
            tracing::warn!(url, error = %e, "Episode page unavailable");
            Vec::new()
        }
    }
}
