//! Event sink that writes one log line per event

use crate::output::traits::{CrawlEvent, EventSink};

/// Default sink: renders every event through `tracing`
///
/// Successful work is logged at `info`, task failures at `warn`. Nothing is
/// aggregated; the log is the only report a run produces.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogSink {
    fn emit(&self, event: CrawlEvent) {
        match event {
            CrawlEvent::PageVisited { url } => {
                tracing::info!("Visiting: {}", url);
            }
            CrawlEvent::PageFailed { url, error } => {
                tracing::warn!("Error visiting {}: {}", url, error);
            }
            CrawlEvent::ImageDownloaded { path, .. } => {
                tracing::info!("Downloaded image: {}", path.display());
            }
            CrawlEvent::ImageConverted { path, .. } => {
                tracing::info!("Converted and saved image as PNG: {}", path.display());
            }
            CrawlEvent::ImageFailed { url, error } => {
                tracing::warn!("Error downloading image {}: {}", url, error);
            }
        }
    }
}
