use crate::config::types::{Config, FetcherConfig, ScraperConfig, ServerConfig};
use crate::url::is_http_url;
use crate::ConfigError;
use std::net::SocketAddr;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_scraper_config(&config.scraper)?;
    Ok(())
}

/// Validates the API listener configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    let address = format!("{}:{}", config.host, config.port);
    address.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!("Invalid listen address '{}': {}", address, e))
    })?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 || config.max_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be between 1 and 10, got {}",
            config.max_attempts
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates extraction configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.episode_prefixes.is_empty() {
        return Err(ConfigError::Validation(
            "at least one episode prefix is required".to_string(),
        ));
    }

    for prefix in &config.episode_prefixes {
        validate_prefix(prefix)?;
    }

    validate_prefix(&config.download_prefix)?;

    if config.batch_keyword.trim().is_empty() {
        return Err(ConfigError::Validation(
            "batch_keyword cannot be empty".to_string(),
        ));
    }

    if config.workers < 1 || config.workers > 100 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 100, got {}",
            config.workers
        )));
    }

    Ok(())
}

/// Validates that a prefix is an absolute HTTP(S) URL
fn validate_prefix(prefix: &str) -> Result<(), ConfigError> {
    if !is_http_url(prefix) {
        return Err(ConfigError::InvalidUrl(format!(
            "Prefix '{}' must be an absolute http(s) URL",
            prefix
        )));
    }
    Ok(())
}
