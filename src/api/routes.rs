//! Route handlers

use crate::api::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

/// Body message returned when `/scrape` is called without a URL
pub const MISSING_URL: &str = "Missing ?url=";

/// Query parameters accepted by `/scrape`
#[derive(Debug, Deserialize)]
pub struct ScrapeParams {
    pub url: Option<String>,
}

/// GET /scrape?url=... - Scrape a main page and its episode pages
///
/// Always answers 200 with a scrape result once a URL is given; fetch
/// failures are reported in the result's `error` field. A missing or empty
/// `url` answers 400.
pub async fn scrape(State(state): State<AppState>, Query(params): Query<ScrapeParams>) -> Response {
    let Some(url) = params
        .url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
    else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": MISSING_URL }))).into_response();
    };

    let result = state.scraper.scrape_main_page(&url).await;
    (StatusCode::OK, Json(result)).into_response()
}

/// GET /ping - Liveness probe
pub async fn ping() -> &'static str {
    "pong"
}
