use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable that overrides the listen port
pub const PORT_ENV_VAR: &str = "PORT";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use modpro_scraper::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Workers: {}", config.scraper.workers);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so that deployments can tell which configuration a
/// running instance was started with.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Applies overrides taken from the process environment
///
/// Currently only `PORT` is honoured.
pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
    let port = std::env::var(PORT_ENV_VAR).ok();
    apply_port_override(config, port.as_deref())
}

/// Overrides the listen port with a raw string value, if one is given
///
/// Empty or whitespace-only values are ignored; anything else must parse as
/// a port number.
pub fn apply_port_override(config: &mut Config, value: Option<&str>) -> Result<(), ConfigError> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(());
    };

    config.server.port = raw.parse::<u16>().map_err(|e| {
        ConfigError::Validation(format!("{} must be a valid port, got '{}': {}", PORT_ENV_VAR, raw, e))
    })?;

    Ok(())
}
