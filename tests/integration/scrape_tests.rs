//! Integration tests for the scraping pipeline
//!
//! These tests use wiremock to serve a main page and its episode pages and
//! run the full pipeline end-to-end against them.

use modpro_scraper::config::Config;
use modpro_scraper::model::{MAIN_PAGE_UNAVAILABLE, NO_EPISODE_LINKS};
use modpro_scraper::pipeline::Scraper;
use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Address nothing listens on, used to simulate network failures
const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Creates a test configuration whose prefixes point at the mock server
fn create_test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.fetcher.max_attempts = 3;
    config.fetcher.timeout_secs = 5;
    config.fetcher.retry_delay_ms = 0;
    config.scraper.episode_prefixes = vec![
        format!("{}/episodes/", server.uri()),
        format!("{}/episodes/", UNREACHABLE),
    ];
    config.scraper.download_prefix = format!("{}/files/", server.uri());
    config
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>Test</title></head><body>{}</body></html>",
            body
        ))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_regular_and_batch_entries_with_downloads() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/show",
        &format!(
            r#"
            <h3>Episode 01 [720p]</h3>
            <p><strong><a href="{base}/episodes/1">Download</a></strong></p>
            <h3>Complete Season</h3>
            <p>Batch/Zip File: <a href="{base}/episodes/pack">Download</a></p>
            <p><a href="https://ads.example.com/">Sponsor</a></p>
            "#
        ),
    )
    .await;

    mount_page(
        &server,
        "/episodes/1",
        &format!(
            r#"<a href="{base}/files/ep1">720p x264</a>
               <a href="https://ads.example.com/">Ad</a>"#
        ),
    )
    .await;

    mount_page(
        &server,
        "/episodes/pack",
        &format!(r#"<p><a href="{base}/files/pack">Season Zip</a></p>"#),
    )
    .await;

    let scraper = Scraper::new(&create_test_config(&server)).expect("Failed to build scraper");
    let result = scraper.scrape_main_page(&format!("{}/show", base)).await;

    assert_eq!(result.error, None);
    assert_eq!(result.regular.len(), 1);
    assert_eq!(result.batch.len(), 1);

    let regular = &result.regular[0];
    assert_eq!(regular.heading.as_deref(), Some("Episode 01 [720p]"));
    assert_eq!(regular.episode_link, format!("{}/episodes/1", base));
    assert_eq!(regular.episode_text, "Download");
    assert_eq!(regular.download_links.len(), 1);
    assert_eq!(regular.download_links[0].url, format!("{}/files/ep1", base));
    assert_eq!(regular.download_links[0].text, "720p x264");

    let batch = &result.batch[0];
    assert_eq!(batch.heading.as_deref(), Some("Complete Season"));
    assert_eq!(batch.download_links.len(), 1);
    assert_eq!(batch.download_links[0].url, format!("{}/files/pack", base));

    let value = serde_json::to_value(&result).expect("Failed to serialize result");
    assert!(value.get("error").is_none());
    assert!(value["regular"][0].get("is_batch").is_none());
}

#[tokio::test]
async fn test_main_page_non_200_after_all_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/show"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let scraper = Scraper::new(&create_test_config(&server)).expect("Failed to build scraper");
    let result = scraper
        .scrape_main_page(&format!("{}/show", server.uri()))
        .await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"regular": [], "batch": [], "error": MAIN_PAGE_UNAVAILABLE})
    );
    assert!(result.error.unwrap().starts_with("Unable to load main page"));
}

#[tokio::test]
async fn test_main_page_soft_block_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/show"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Checking your browser..."))
        .expect(3)
        .mount(&server)
        .await;

    let scraper = Scraper::new(&create_test_config(&server)).expect("Failed to build scraper");
    let result = scraper
        .scrape_main_page(&format!("{}/show", server.uri()))
        .await;

    assert_eq!(result.error.as_deref(), Some(MAIN_PAGE_UNAVAILABLE));
    assert!(result.regular.is_empty());
    assert!(result.batch.is_empty());
}

#[tokio::test]
async fn test_main_page_recovers_on_retry() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/show"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    mount_page(
        &server,
        "/show",
        &format!(r#"<h3>Episode 07</h3><p><a href="{base}/episodes/7">Download</a></p>"#),
    )
    .await;

    mount_page(&server, "/episodes/7", "<p>No files yet</p>").await;

    let scraper = Scraper::new(&create_test_config(&server)).expect("Failed to build scraper");
    let result = scraper.scrape_main_page(&format!("{}/show", base)).await;

    assert_eq!(result.error, None);
    assert_eq!(result.regular.len(), 1);
    assert!(result.regular[0].download_links.is_empty());
}

#[tokio::test]
async fn test_no_episode_links_found() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/show",
        r#"<h3>Nothing here</h3><p><a href="https://example.com/">Elsewhere</a></p>"#,
    )
    .await;

    let scraper = Scraper::new(&create_test_config(&server)).expect("Failed to build scraper");
    let result = scraper
        .scrape_main_page(&format!("{}/show", server.uri()))
        .await;

    assert!(result.regular.is_empty());
    assert!(result.batch.is_empty());
    assert_eq!(result.error.as_deref(), Some(NO_EPISODE_LINKS));
    assert!(NO_EPISODE_LINKS.starts_with("No episode links found"));
}

#[tokio::test]
async fn test_secondary_failure_is_isolated() {
    let server = MockServer::start().await;
    let base = server.uri();
    let unreachable = UNREACHABLE;

    mount_page(
        &server,
        "/show",
        &format!(
            r#"
            <h3>Episode 01</h3>
            <p><a href="{unreachable}/episodes/1">Download</a></p>
            <h3>Episode 02</h3>
            <p><a href="{base}/episodes/2">Download</a></p>
            "#
        ),
    )
    .await;

    mount_page(
        &server,
        "/episodes/2",
        &format!(
            r#"<a href="{base}/files/2a">480p</a><a href="{base}/files/2b">1080p</a>"#
        ),
    )
    .await;

    let scraper = Scraper::new(&create_test_config(&server)).expect("Failed to build scraper");
    let result = scraper.scrape_main_page(&format!("{}/show", base)).await;

    assert_eq!(result.error, None);
    assert_eq!(result.regular.len(), 2);

    assert_eq!(result.regular[0].episode_link, format!("{}/episodes/1", UNREACHABLE));
    assert!(result.regular[0].download_links.is_empty());

    let texts: Vec<&str> = result.regular[1]
        .download_links
        .iter()
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(texts, vec!["480p", "1080p"]);
}

#[tokio::test]
async fn test_secondary_http_error_is_isolated() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/show",
        &format!(
            r#"
            <p>Batch/Zip File <a href="{base}/episodes/pack">Pack</a></p>
            <p><a href="{base}/episodes/3">Episode 3</a></p>
            "#
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/episodes/pack"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    mount_page(
        &server,
        "/episodes/3",
        &format!(r#"<a href="{base}/files/3">Mirror</a>"#),
    )
    .await;

    let scraper = Scraper::new(&create_test_config(&server)).expect("Failed to build scraper");
    let result = scraper.scrape_main_page(&format!("{}/show", base)).await;

    assert_eq!(result.error, None);
    assert_eq!(result.batch.len(), 1);
    assert!(result.batch[0].download_links.is_empty());
    assert_eq!(result.regular.len(), 1);
    assert_eq!(result.regular[0].download_links.len(), 1);
}

#[tokio::test]
async fn test_results_keep_document_order_with_single_worker() {
    let server = MockServer::start().await;
    let base = server.uri();

    let mut listing = String::new();
    for n in 1..=5 {
        listing.push_str(&format!(
            r#"<h3>Episode {n:02}</h3><p><a href="{base}/episodes/{n}">Download</a></p>"#
        ));
        mount_page(
            &server,
            &format!("/episodes/{}", n),
            &format!(r#"<a href="{base}/files/{n}">File {n}</a>"#),
        )
        .await;
    }
    mount_page(&server, "/show", &listing).await;

    let mut config = create_test_config(&server);
    config.scraper.workers = 1;

    let scraper = Scraper::new(&config).expect("Failed to build scraper");
    let result = scraper.scrape_main_page(&format!("{}/show", base)).await;

    assert_eq!(result.regular.len(), 5);
    for (i, entry) in result.regular.iter().enumerate() {
        let n = i + 1;
        assert_eq!(entry.heading, Some(format!("Episode {:02}", n)));
        assert_eq!(entry.download_links.len(), 1);
        assert_eq!(entry.download_links[0].text, format!("File {}", n));
    }
}

#[tokio::test]
async fn test_browser_headers_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/show"))
        .and(header("user-agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64)"))
        .and(header_exists("accept-language"))
        .and(header("referer", "https://www.google.com/"))
        .and(header("cache-control", "no-cache"))
        .and(header("pragma", "no-cache"))
        .respond_with(html_page("<p>No episodes</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = Scraper::new(&create_test_config(&server)).expect("Failed to build scraper");
    let result = scraper
        .scrape_main_page(&format!("{}/show", server.uri()))
        .await;

    // Reaching extraction proves the header-matching mock answered.
    assert_eq!(result.error.as_deref(), Some(NO_EPISODE_LINKS));
}
