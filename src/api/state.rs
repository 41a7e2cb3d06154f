//! Application state for the API server

use crate::pipeline::Scraper;
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clone).
#[derive(Clone)]
pub struct AppState {
    /// The scraper shared by every request
    pub scraper: Arc<Scraper>,
}

impl AppState {
    pub fn new(scraper: Arc<Scraper>) -> Self {
        Self { scraper }
    }
}
