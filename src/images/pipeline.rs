//! Concurrent image acquisition
//!
//! Every discovered image gets its own task. Tasks share nothing except the
//! HTTP client, the image counter, and the event sink, and a failing task
//! only reports itself.

use crate::images::acquire::acquire;
use crate::output::{CrawlEvent, SharedSink};
use crate::state::ImageCounter;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Handle over all image tasks of a crawl
///
/// `dispatch` never waits for the download it starts. `drain` waits until
/// every dispatched task has finished, which is how a crawl (or a test)
/// makes sure the output directory is complete.
pub struct ImagePipeline {
    client: Client,
    output_dir: Arc<PathBuf>,
    counter: Arc<ImageCounter>,
    sink: SharedSink,
    permits: Arc<Semaphore>,
    tasks: JoinSet<()>,
    dispatched: u64,
}

impl ImagePipeline {
    /// Creates a new pipeline
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for every download
    /// * `output_dir` - Directory images are written into
    /// * `counter` - Shared counter used to name files
    /// * `sink` - Where outcomes are reported
    /// * `max_concurrent` - Upper bound on downloads in flight
    pub fn new(
        client: Client,
        output_dir: impl Into<PathBuf>,
        counter: Arc<ImageCounter>,
        sink: SharedSink,
        max_concurrent: usize,
    ) -> Self {
        Self {
            client,
            output_dir: Arc::new(output_dir.into()),
            counter,
            sink,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            tasks: JoinSet::new(),
            dispatched: 0,
        }
    }

    /// Starts downloading `url` in the background
    pub fn dispatch(&mut self, url: Url) {
        self.reap_finished();
        self.dispatched += 1;

        let client = self.client.clone();
        let output_dir = Arc::clone(&self.output_dir);
        let counter = Arc::clone(&self.counter);
        let sink = Arc::clone(&self.sink);
        let permits = Arc::clone(&self.permits);

        self.tasks.spawn(async move {
            let _permit = permits.acquire_owned().await.ok();

            let event = match acquire(&client, &counter, &url, &output_dir).await {
                Ok(image) if image.format.transcodes() => CrawlEvent::ImageConverted {
                    url: url.to_string(),
                    path: image.path,
                },
                Ok(image) => CrawlEvent::ImageDownloaded {
                    url: url.to_string(),
                    path: image.path,
                },
                Err(e) => CrawlEvent::ImageFailed {
                    url: url.to_string(),
                    error: e.to_string(),
                },
            };

            sink.emit(event);
        });
    }

    /// Waits for every dispatched task to finish
    pub async fn drain(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Image task aborted: {}", e);
            }
        }
    }

    /// Number of tasks dispatched and not yet collected
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Total number of tasks dispatched so far
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Collects tasks that already finished so the set does not grow with
    /// every image of a long crawl
    fn reap_finished(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(e) = joined {
                tracing::error!("Image task aborted: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RecordingSink;

    #[tokio::test]
    async fn test_drain_with_no_tasks_returns_immediately() {
        let sink = Arc::new(RecordingSink::new());
        let dir = tempfile::tempdir().unwrap();
        let mut pipeline = ImagePipeline::new(
            Client::new(),
            dir.path(),
            Arc::new(ImageCounter::new()),
            sink.clone(),
            4,
        );

        pipeline.drain().await;

        assert_eq!(pipeline.in_flight(), 0);
        assert_eq!(pipeline.dispatched(), 0);
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_image_reports_failure() {
        let sink = Arc::new(RecordingSink::new());
        let dir = tempfile::tempdir().unwrap();
        let counter = Arc::new(ImageCounter::new());
        let mut pipeline =
            ImagePipeline::new(Client::new(), dir.path(), counter.clone(), sink.clone(), 4);

        pipeline.dispatch(Url::parse("http://127.0.0.1:1/missing.jpg").unwrap());
        pipeline.drain().await;

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], CrawlEvent::ImageFailed { .. }));
        // The download failed before a file name was allocated
        assert_eq!(counter.issued(), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
