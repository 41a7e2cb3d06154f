//! Modpro-Scraper: an episode and download link harvester
//!
//! This crate fetches an episode listing page, extracts the episode links it
//! carries, splits them into regular and batch releases, and follows every
//! episode page to collect its download links. Results are served as JSON
//! over a small HTTP API.

pub mod api;
pub mod config;
pub mod model;
pub mod pipeline;
pub mod url;

use thiserror::Error;

/// Main error type for Modpro-Scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    Server(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Modpro-Scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{DownloadLink, Entry, ScrapeResult};
pub use pipeline::{FetchError, Fetcher, Scraper};
pub use crate::url::{matches_any_prefix, starts_with_prefix};
