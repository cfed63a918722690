//! Output module for crawl events
//!
//! The traversal engine and the image pipeline never return errors to each
//! other. Instead they report what happened as `CrawlEvent`s into a shared
//! `EventSink`. This module handles:
//! - The event types and the sink trait
//! - The default sink, which turns events into log lines
//! - A recording sink for embedders and tests

mod log_sink;
mod recording;
mod traits;

pub use log_sink::LogSink;
pub use recording::RecordingSink;
pub use traits::{CrawlEvent, EventSink, SharedSink};
