//! Modpro-Scraper main entry point
//!
//! This is the command-line interface for the Modpro-Scraper service.

use clap::Parser;
use modpro_scraper::api::start_api_server;
use modpro_scraper::config::{apply_env_overrides, load_config_with_hash, validate, Config};
use modpro_scraper::pipeline::Scraper;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Modpro-Scraper: episode and download link harvester
///
/// Serves a JSON API that scrapes an episode listing page, splits its
/// episode links into regular and batch releases, and collects the download
/// links found on every episode page.
#[derive(Parser, Debug)]
#[command(name = "modpro-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Episode and download link harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Scrape a single main page, print the JSON result and exit
    #[arg(long, value_name = "URL", conflicts_with = "dry_run")]
    scrape: Option<String>,

    /// Validate config and show the effective settings without serving
    #[arg(long, conflicts_with = "scrape")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if let Some(url) = cli.scrape.as_deref() {
        handle_scrape(&config, url).await?;
    } else {
        handle_serve(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("modpro_scraper=info,warn"),
            1 => EnvFilter::new("modpro_scraper=debug,info"),
            2 => EnvFilter::new("modpro_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any), then applies `PORT` and `--port`
fn load_effective_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    validate(&config)?;

    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Modpro-Scraper Dry Run ===\n");

    println!("Server:");
    println!("  Listen: {}:{}", config.server.host, config.server.port);

    println!("\nFetcher:");
    println!("  Max attempts: {}", config.fetcher.max_attempts);
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  Retry delay: {}ms", config.fetcher.retry_delay_ms);
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Accept-Language: {}", config.fetcher.accept_language);
    println!("  Referer: {}", config.fetcher.referer);

    println!("\nScraper:");
    println!("  Workers: {}", config.scraper.workers);
    println!("  Batch keyword: {}", config.scraper.batch_keyword);
    println!("  Download prefix: {}", config.scraper.download_prefix);
    println!(
        "  Episode prefixes ({}):",
        config.scraper.episode_prefixes.len()
    );
    for prefix in &config.scraper.episode_prefixes {
        println!("    * {}", prefix);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --scrape mode: runs the pipeline once and prints JSON
async fn handle_scrape(config: &Config, url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let scraper = Scraper::new(config)?;
    let result = scraper.scrape_main_page(url).await;

    if let Some(error) = &result.error {
        tracing::warn!("Scrape finished with error: {}", error);
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Handles the default mode: serves the HTTP API
async fn handle_serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Worker pool: {}, fetch attempts: {}, timeout: {}s",
        config.scraper.workers,
        config.fetcher.max_attempts,
        config.fetcher.timeout_secs
    );

    let scraper = Arc::new(Scraper::new(&config)?);

    match start_api_server(scraper, &config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("API server failed: {}", e);
            Err(e.into())
        }
    }
}
