//! HTTP fetcher implementation
//!
//! This module handles every HTTP request made by the pipeline, including:
//! - Building the shared HTTP client
//! - Sending a browser-like header set with every request
//! - Per-attempt timeouts and a bounded retry loop
//! - Rejecting soft-block pages that answer 200 without an HTML body
//! - Error classification

use crate::config::FetcherConfig;
use crate::{ConfigError, ScraperError};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA, REFERER, USER_AGENT,
};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Marker that must appear in a body for it to count as an HTML page
const HTML_MARKER: &str = "<html";

/// A successfully fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,

    /// Page body content
    pub body: String,
}

/// Reasons a fetch can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network error (connection refused, timeout, invalid URL, etc.)
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with something other than 200 OK
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// 200 OK, but the body does not look like an HTML page
    #[error("Response from {url} is not an HTML page")]
    NotHtml { url: String },
}

/// Builds the HTTP client shared by every fetch
///
/// Per-request settings (headers, timeout) are applied by [`Fetcher`], so
/// the client itself carries no request state.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the browser-like header set sent with every request
///
/// # Returns
///
/// * `Ok(HeaderMap)` - Headers ready to attach to a request
/// * `Err(ConfigError)` - A configured value is not a legal header value
pub fn build_headers(config: &FetcherConfig) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, header_value("user_agent", &config.user_agent)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value("accept_language", &config.accept_language)?,
    );
    headers.insert(REFERER, header_value("referer", &config.referer)?);
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    Ok(headers)
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value)
        .map_err(|e| ConfigError::Validation(format!("Invalid {} header value: {}", field, e)))
}

/// Returns true if a response body looks like an HTML page
///
/// The check is a case-insensitive search for `<html`, which filters out
/// redirect stubs and plain-text block pages served with status 200.
pub fn looks_like_html(body: &str) -> bool {
    body.to_lowercase().contains(HTML_MARKER)
}

/// Fetches HTML pages with retry and spoofed browser headers
///
/// A `Fetcher` is immutable once built and cheap to share behind an `Arc`;
/// connection reuse happens inside the `reqwest` client.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    headers: HeaderMap,
    timeout: Duration,
    max_attempts: u32,
    retry_delay: Duration,
}

impl Fetcher {
    /// Creates a fetcher with its own HTTP client
    pub fn new(config: &FetcherConfig) -> Result<Self, ScraperError> {
        let client = build_http_client()?;
        Self::with_client(client, config)
    }

    /// Creates a fetcher around an existing HTTP client
    pub fn with_client(client: Client, config: &FetcherConfig) -> Result<Self, ScraperError> {
        let headers = build_headers(config)?;

        Ok(Self {
            client,
            headers,
            timeout: Duration::from_secs(config.timeout_secs),
            max_attempts: config.max_attempts.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    /// Number of attempts made per URL
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Fetches a URL, retrying until an attempt succeeds or attempts run out
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | HTTP 200 with `<html` in the body | Success |
    /// | HTTP 200 without `<html` | Retry |
    /// | Any other status | Retry |
    /// | Timeout / connection / other network error | Retry |
    ///
    /// # Returns
    ///
    /// * `Ok(FetchedPage)` - The first successful attempt
    /// * `Err(FetchError)` - The failure of the last attempt
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match self.fetch_once(url).await {
                Ok(page) => {
                    tracing::debug!(url, attempt, "Fetched page");
                    return Ok(page);
                }
                Err(e) => {
                    tracing::warn!(
                        url,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Fetch attempt failed"
                    );
                    last_error = Some(e);
                }
            }

            if attempt < self.max_attempts && !self.retry_delay.is_zero() {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        let error = last_error.unwrap_or_else(|| FetchError::Network {
            url: url.to_string(),
            message: "No fetch attempt was made".to_string(),
        });
        tracing::error!(url, attempts = self.max_attempts, error = %error, "Giving up on page");
        Err(error)
    }

    /// Makes a single request and checks the response
    async fn fetch_once(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| classify_network_error(url, &e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| classify_network_error(url, &e))?;

        if !looks_like_html(&body) {
            return Err(FetchError::NotHtml {
                url: url.to_string(),
            });
        }

        Ok(FetchedPage {
            url: final_url,
            body,
        })
    }
}

fn classify_network_error(url: &str, error: &reqwest::Error) -> FetchError {
    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        "Connection refused".to_string()
    } else {
        error.to_string()
    };

    FetchError::Network {
        url: url.to_string(),
        message,
    }
}
