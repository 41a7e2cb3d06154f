//! Configuration module for Modpro-Scraper
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. The file is optional: every value has a default matching the
//! target site, and the listen port can be overridden through `PORT`.
//!
//! # Example
//!
//! ```no_run
//! use modpro_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Fetch attempts per URL: {}", config.fetcher.max_attempts);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetcherConfig, ScraperConfig, ServerConfig, DEFAULT_BATCH_KEYWORD,
    DEFAULT_DOWNLOAD_PREFIX, DEFAULT_EPISODE_PREFIXES,
};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, apply_port_override, compute_config_hash, load_config,
    load_config_with_hash, PORT_ENV_VAR,
};
pub use validation::validate;
