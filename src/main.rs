//! Site-Harvest main entry point
//!
//! This is the command-line interface for the Site-Harvest image crawler.

use anyhow::Context;
use clap::Parser;
use site_harvest::config::{compute_config_hash, load_config, ConfigOverrides};
use site_harvest::crawler::crawl;
use site_harvest::output::LogSink;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Site-Harvest: download every image on a website
///
/// Site-Harvest crawls every page under a base URL, follows only links that
/// start with that URL, and saves every image it finds. WEBP images are
/// converted to PNG.
///
/// The base URL and download directory can also be given through the
/// WEBSITE_URL and DOWNLOAD_DIR environment variables or a `.env` file.
#[derive(Parser, Debug)]
#[command(name = "site-harvest")]
#[command(version)]
#[command(about = "Download every image on a website", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Base URL to crawl (overrides WEBSITE_URL)
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Directory to save images into (overrides DOWNLOAD_DIR)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // A .env file is optional; real environment variables win over it
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }

    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
        let hash = compute_config_hash(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        tracing::debug!("Configuration file hash: {}", hash);
    }

    let overrides = ConfigOverrides {
        base_url: cli.url,
        download_dir: cli.output_dir,
    };

    let config = match load_config(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e).context("Invalid configuration, nothing was crawled");
        }
    };

    tracing::info!(
        "Crawling {} into {}",
        config.crawler.base_url,
        config.output.download_dir.display()
    );

    crawl(config, Arc::new(LogSink::new()))
        .await
        .context("Crawl failed")?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_harvest=info,warn"),
            1 => EnvFilter::new("site_harvest=debug,info"),
            2 => EnvFilter::new("site_harvest=trace,debug"),
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
