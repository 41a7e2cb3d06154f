//! REST API server module
//!
//! Exposes the scraping pipeline over HTTP.

use crate::config::Config;
use crate::pipeline::Scraper;
use crate::{Result, ScraperError};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod routes;
pub mod state;

pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// - `GET /scrape?url=<main page>` - Scrape a main page and its episode pages
/// - `GET /ping` - Liveness probe, answers `pong`
pub fn create_router(scraper: Arc<Scraper>) -> Router {
    let state = AppState::new(scraper);

    Router::new()
        .route("/scrape", get(routes::scrape))
        .route("/ping", get(routes::ping))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Resolves the socket address the server should bind
pub fn bind_address(config: &Config) -> Result<SocketAddr> {
    let address = format!("{}:{}", config.server.host, config.server.port);
    address
        .parse()
        .map_err(|e| ScraperError::Server(format!("Invalid bind address '{}': {}", address, e)))
}

/// Start the API server on the configured bind address.
///
/// Runs until the server stops, either due to an error or because the
/// process is shut down.
///
/// # Example
///
/// ```no_run
/// use modpro_scraper::config::Config;
/// use modpro_scraper::pipeline::Scraper;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let scraper = Arc::new(Scraper::new(&config)?);
///
/// // Start API server (blocks until shutdown)
/// modpro_scraper::api::start_api_server(scraper, &config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(scraper: Arc<Scraper>, config: &Config) -> Result<()> {
    let address = bind_address(config)?;

    tracing::info!(address = %address, "Starting API server");

    let app = create_router(scraper);

    let listener = TcpListener::bind(address).await?;

    tracing::info!(address = %address, "API server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| ScraperError::Server(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}
