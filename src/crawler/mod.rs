//! Crawler module for page traversal
//!
//! This module contains the traversal engine, including:
//! - HTTP fetching of pages
//! - HTML parsing and link/image extraction
//! - The crawl loop that applies scope and deduplication rules

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, CrawlReport, Crawler};
pub use fetcher::{build_http_client, fetch_page, PageDocument};
pub use parser::{extract_images, extract_links, parse_html, parse_page, ParsedPage};

use crate::config::Config;
use crate::output::SharedSink;
use crate::HarvestError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Fetch the base URL and every in-scope page reachable from it
/// 3. Download every image found on those pages
/// 4. Wait for outstanding image downloads
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `sink` - Where page and image events are reported
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl ran to completion
/// * `Err(HarvestError)` - The crawler could not be set up
pub async fn crawl(config: Config, sink: SharedSink) -> Result<CrawlReport, HarvestError> {
    run_crawl(config, sink).await
}
