use serde::Deserialize;

/// Default episode listing hosts of the target site
pub const DEFAULT_EPISODE_PREFIXES: &[&str] =
    &["https://episodes.modpro.blog/", "https://links.modpro.blog/"];

/// Default host that episode pages link their downloads to
pub const DEFAULT_DOWNLOAD_PREFIX: &str = "https://tech.unblockedgames.world/";

/// Default phrase that marks a batch release
pub const DEFAULT_BATCH_KEYWORD: &str = "batch/zip file";

/// Main configuration structure for Modpro-Scraper
///
/// Every section is optional in the TOML file; missing values fall back to
/// the defaults of the target site.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
}

/// HTTP API listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on (overridden by the `PORT` environment variable)
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Page fetching configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Number of attempts per URL before giving up
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Per-attempt timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pause between failed attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default)]
    pub retry_delay_ms: u64,

    /// Browser-like User-Agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header value
    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,

    /// Referer header value
    #[serde(default = "default_referer")]
    pub referer: String,
}

/// Extraction and fan-out configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Prefixes an href must start with to count as an episode link
    #[serde(rename = "episode-prefixes", default = "default_episode_prefixes")]
    pub episode_prefixes: Vec<String>,

    /// Prefix an href on an episode page must start with to count as a download
    #[serde(rename = "download-prefix", default = "default_download_prefix")]
    pub download_prefix: String,

    /// Phrase marking a batch release, matched case-insensitively
    #[serde(rename = "batch-keyword", default = "default_batch_keyword")]
    pub batch_keyword: String,

    /// Maximum number of episode pages fetched at the same time
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            timeout_secs: default_timeout_secs(),
            retry_delay_ms: 0,
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            referer: default_referer(),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            episode_prefixes: default_episode_prefixes(),
            download_prefix: default_download_prefix(),
            batch_keyword: default_batch_keyword(),
            workers: default_workers(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_attempts() -> u32 {
    3
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

fn default_referer() -> String {
    "https://www.google.com/".to_string()
}

fn default_episode_prefixes() -> Vec<String> {
    DEFAULT_EPISODE_PREFIXES
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_download_prefix() -> String {
    DEFAULT_DOWNLOAD_PREFIX.to_string()
}

fn default_batch_keyword() -> String {
    DEFAULT_BATCH_KEYWORD.to_string()
}

fn default_workers() -> usize {
    20
}
