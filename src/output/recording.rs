//! In-memory event sink

use crate::output::log_sink::LogSink;
use crate::output::traits::{CrawlEvent, EventSink};
use std::sync::{Mutex, PoisonError};

/// Sink that keeps every event in memory
///
/// Useful for embedding the crawler and for asserting on a finished run.
/// Events can optionally be forwarded to a `LogSink` as well.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<CrawlEvent>>,
    echo: Option<LogSink>,
}

impl RecordingSink {
    /// Creates a sink that only records
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that records and also logs every event
    pub fn with_logging() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            echo: Some(LogSink::new()),
        }
    }

    /// Snapshot of all events recorded so far, in emission order
    pub fn events(&self) -> Vec<CrawlEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// URLs of every `PageVisited` event, in emission order
    pub fn visited_pages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                CrawlEvent::PageVisited { url } => Some(url),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded failures
    pub fn failure_count(&self) -> usize {
        self.events().iter().filter(|e| e.is_failure()).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: CrawlEvent) {
        if let Some(echo) = &self.echo {
            echo.emit(event.clone());
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
