//! URL handling module for Modpro-Scraper
//!
//! This module provides the prefix predicates used to recognise episode and
//! download links, plus scheme checks used when validating configuration.

mod matcher;

// Re-export main functions
pub use matcher::{fold_for_match, matches_any_prefix, starts_with_prefix};

/// Returns true if the string parses as an absolute HTTP(S) URL with a host
///
/// # Examples
///
/// ```
/// use modpro_scraper::url::is_http_url;
///
/// assert!(is_http_url("https://episodes.modpro.blog/"));
/// assert!(is_http_url("http://127.0.0.1:8080/episodes/"));
/// assert!(!is_http_url("ftp://example.com/"));
/// assert!(!is_http_url("not a url"));
/// ```
pub fn is_http_url(value: &str) -> bool {
    match ::url::Url::parse(value) {
        Ok(parsed) => {
            (parsed.scheme() == "http" || parsed.scheme() == "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}
