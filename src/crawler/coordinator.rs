//! Crawler coordinator - main traversal logic
//!
//! This module contains the crawl loop that ties the pieces together:
//! - Seeding the visited set with the base URL
//! - Spawning one fetch task per admitted page
//! - Applying the scope rule and deduplicating discovered links
//! - Handing every discovered image to the image pipeline
//! - Waiting for the image pipeline once traversal is exhausted

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::parser::{parse_page, ParsedPage};
use crate::images::ImagePipeline;
use crate::output::{CrawlEvent, SharedSink};
use crate::state::{ImageCounter, VisitedSet};
use crate::url::CrawlScope;
use crate::{FetchError, HarvestError};
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

type PageTaskResult = Result<ParsedPage, FetchError>;

/// Counts returned by a finished crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Pages fetched and scanned
    pub pages_fetched: usize,

    /// Pages whose fetch failed
    pub pages_failed: usize,

    /// Image tasks dispatched (one per `<img>` occurrence)
    pub images_dispatched: u64,
}

/// Traversal engine for one site
pub struct Crawler {
    config: Arc<Config>,
    client: Client,
    visited: Arc<VisitedSet>,
    pipeline: ImagePipeline,
    sink: SharedSink,
    page_permits: Arc<Semaphore>,
}

impl Crawler {
    /// Creates a new crawler with fresh shared state
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `sink` - Where page and image events are reported
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Successfully created crawler
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(config: Config, sink: SharedSink) -> Result<Self, HarvestError> {
        Self::with_state(
            config,
            sink,
            Arc::new(VisitedSet::new()),
            Arc::new(ImageCounter::new()),
        )
    }

    /// Creates a crawler around caller-provided shared state
    ///
    /// The visited set and the image counter are only ever touched through
    /// their own atomic operations, so the caller may keep a handle and
    /// inspect them while or after the crawl runs.
    pub fn with_state(
        config: Config,
        sink: SharedSink,
        visited: Arc<VisitedSet>,
        counter: Arc<ImageCounter>,
    ) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.crawler)?;

        let pipeline = ImagePipeline::new(
            client.clone(),
            config.output.download_dir.clone(),
            counter,
            Arc::clone(&sink),
            config.crawler.max_concurrent_images,
        );

        let page_permits = Arc::new(Semaphore::new(config.crawler.max_concurrent_pages.max(1)));

        Ok(Self {
            config: Arc::new(config),
            client,
            visited,
            pipeline,
            sink,
            page_permits,
        })
    }

    /// The visited set shared with this crawler
    pub fn visited(&self) -> &Arc<VisitedSet> {
        &self.visited
    }

    /// Runs the crawl to exhaustion
    ///
    /// Traversal ends when no page fetch is outstanding. Image tasks are
    /// never awaited while pages are still being crawled; once traversal is
    /// done the pipeline is drained so every started download finishes
    /// before this returns.
    pub async fn run(&mut self) -> CrawlReport {
        let base_url = self.config.crawler.base_url.clone();
        let start_time = Instant::now();
        let mut report = CrawlReport::default();
        let mut fetches: JoinSet<PageTaskResult> = JoinSet::new();

        tracing::debug!(
            "Starting crawl of {} into {}",
            base_url,
            self.config.output.download_dir.display()
        );

        // The seed is admitted under its configured spelling and under the
        // serialized form links to it will resolve to
        let scope = CrawlScope::new(&base_url);
        for spelling in scope.spellings() {
            self.visited.insert(spelling);
        }
        self.spawn_fetch(&mut fetches, base_url.clone());

        while let Some(joined) = fetches.join_next().await {
            let parsed = match joined {
                Ok(Ok(parsed)) => parsed,
                Ok(Err(_)) => {
                    report.pages_failed += 1;
                    continue;
                }
                Err(e) => {
                    tracing::error!("Page task aborted: {}", e);
                    report.pages_failed += 1;
                    continue;
                }
            };

            report.pages_fetched += 1;

            for image in parsed.images {
                self.pipeline.dispatch(image);
            }

            for link in parsed.links {
                if scope.contains(&link) && self.visited.insert(&link) {
                    self.spawn_fetch(&mut fetches, link);
                }
            }
        }

        tracing::debug!(
            "Traversal finished after {} pages, waiting for {} image tasks",
            report.pages_fetched + report.pages_failed,
            self.pipeline.in_flight()
        );
        self.pipeline.drain().await;

        report.images_dispatched = self.pipeline.dispatched();

        tracing::info!(
            "Crawl completed: {} pages, {} images in {:?}",
            report.pages_fetched,
            report.images_dispatched,
            start_time.elapsed()
        );

        report
    }

    /// Spawns the fetch task for a URL that was just admitted
    ///
    /// The task reports `PageVisited` when its request starts and
    /// `PageFailed` if the fetch fails. The concurrency permit is released
    /// as soon as the response body has been read.
    fn spawn_fetch(&self, fetches: &mut JoinSet<PageTaskResult>, url: String) {
        let client = self.client.clone();
        let sink = Arc::clone(&self.sink);
        let permits = Arc::clone(&self.page_permits);
        let parse_error_responses = self.config.crawler.parse_error_responses;

        fetches.spawn(async move {
            let permit = permits.acquire_owned().await.ok();

            sink.emit(CrawlEvent::PageVisited { url: url.clone() });
            let fetched = fetch_page(&client, &url, parse_error_responses).await;
            drop(permit);

            match fetched {
                Ok(doc) => Ok(parse_page(&doc)),
                Err(e) => {
                    sink.emit(CrawlEvent::PageFailed {
                        url,
                        error: e.to_string(),
                    });
                    Err(e)
                }
            }
        });
    }
}

/// Runs a complete crawl with a fresh crawler
///
/// # Example
///
/// ```no_run
/// use site_harvest::config::Config;
/// use site_harvest::crawler::run_crawl;
/// use site_harvest::output::LogSink;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), site_harvest::HarvestError> {
/// let config = Config::new("https://example.com/blog", "./downloads");
/// let report = run_crawl(config, Arc::new(LogSink::new())).await?;
/// println!("{} pages", report.pages_fetched);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config, sink: SharedSink) -> Result<CrawlReport, HarvestError> {
    let mut crawler = Crawler::new(config, sink)?;
    Ok(crawler.run().await)
}
