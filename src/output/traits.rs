//! Event sink trait and event types
//!
//! This module defines what the traversal engine and the image pipeline
//! report while they work, and the trait every consumer of those reports
//! implements.

use std::path::PathBuf;
use std::sync::Arc;

/// Something that happened during a crawl
///
/// Errors are carried as rendered messages: an event only exists to be
/// reported, never to be matched on and recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// A page fetch is starting
    PageVisited {
        /// The page URL
        url: String,
    },

    /// A page could not be fetched
    PageFailed {
        /// The page URL
        url: String,
        /// Error message
        error: String,
    },

    /// An image was written to disk unchanged
    ImageDownloaded {
        /// The image URL
        url: String,
        /// Where the file was written
        path: PathBuf,
    },

    /// A WEBP image was converted and written as PNG
    ImageConverted {
        /// The image URL
        url: String,
        /// Where the PNG was written
        path: PathBuf,
    },

    /// An image task failed
    ImageFailed {
        /// The image URL
        url: String,
        /// Error message
        error: String,
    },
}

impl CrawlEvent {
    /// The URL this event is about
    pub fn url(&self) -> &str {
        match self {
            Self::PageVisited { url }
            | Self::PageFailed { url, .. }
            | Self::ImageDownloaded { url, .. }
            | Self::ImageConverted { url, .. }
            | Self::ImageFailed { url, .. } => url,
        }
    }

    /// Returns true if this event reports a failed task
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::PageFailed { .. } | Self::ImageFailed { .. })
    }

    /// The file written, for image events that produced one
    pub fn written_path(&self) -> Option<&PathBuf> {
        match self {
            Self::ImageDownloaded { path, .. } | Self::ImageConverted { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Trait for event consumers
///
/// Sinks are shared by every page and image task, so implementations must be
/// thread-safe and must not block for long: `emit` is called from inside
/// async tasks.
pub trait EventSink: Send + Sync {
    /// Records a single event
    ///
    /// # Arguments
    ///
    /// * `event` - The event to record
    fn emit(&self, event: CrawlEvent);
}

/// Sink handle shared between the traversal engine and the image pipeline
pub type SharedSink = Arc<dyn EventSink>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_accessor() {
        let event = CrawlEvent::ImageFailed {
            url: "https://example.com/a.webp".to_string(),
            error: "boom".to_string(),
        };
        assert_eq!(event.url(), "https://example.com/a.webp");
    }

    #[test]
    fn test_is_failure() {
        let visited = CrawlEvent::PageVisited {
            url: "https://example.com/".to_string(),
        };
        let failed = CrawlEvent::PageFailed {
            url: "https://example.com/".to_string(),
            error: "HTTP 500".to_string(),
        };
        assert!(!visited.is_failure());
        assert!(failed.is_failure());
    }

    #[test]
    fn test_written_path() {
        let converted = CrawlEvent::ImageConverted {
            url: "https://example.com/a.webp".to_string(),
            path: PathBuf::from("out/image-1.webp.png"),
        };
        assert_eq!(
            converted.written_path(),
            Some(&PathBuf::from("out/image-1.webp.png"))
        );

        let visited = CrawlEvent::PageVisited {
            url: "https://example.com/".to_string(),
        };
        assert_eq!(visited.written_path(), None);
    }
}
