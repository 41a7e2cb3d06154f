//! Result types produced by the scraping pipeline
//!
//! These are the values serialized into the JSON body of `/scrape`.

use serde::Serialize;

/// Error reported when the main page cannot be fetched
pub const MAIN_PAGE_UNAVAILABLE: &str = "Unable to load main page (protection/timeout).";

/// Error reported when the main page carries no episode links
pub const NO_EPISODE_LINKS: &str = "No episode links found (page may be protected or changed).";

/// A download link found on an episode page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub url: String,
    pub text: String,
}

/// An episode link found on the main page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Nearest preceding heading text, if one was found
    pub heading: Option<String>,

    pub episode_link: String,

    pub episode_text: String,

    /// Filled in once the episode page has been fetched
    pub download_links: Vec<DownloadLink>,

    /// Only used to partition entries; never serialized
    #[serde(skip)]
    pub is_batch: bool,
}

impl Entry {
    /// Creates an entry with no download links yet
    pub fn new(
        heading: Option<String>,
        episode_link: impl Into<String>,
        episode_text: impl Into<String>,
        is_batch: bool,
    ) -> Self {
        Self {
            heading,
            episode_link: episode_link.into(),
            episode_text: episode_text.into(),
            download_links: Vec::new(),
            is_batch,
        }
    }
}

/// Top-level output of a scrape
///
/// When `error` is set both lists are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScrapeResult {
    pub regular: Vec<Entry>,
    pub batch: Vec<Entry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeResult {
    /// Builds an error result with empty lists
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            regular: Vec::new(),
            batch: Vec::new(),
            error: Some(message.into()),
        }
    }

    /// Splits entries into regular and batch lists, keeping their order
    pub fn partition(entries: Vec<Entry>) -> Self {
        let (batch, regular): (Vec<Entry>, Vec<Entry>) =
            entries.into_iter().partition(|entry| entry.is_batch);

        Self {
            regular,
            batch,
            error: None,
        }
    }

    /// Returns true if the result carries an error
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Total number of entries across both lists
    pub fn entry_count(&self) -> usize {
        self.regular.len() + self.batch.len()
    }
}
