//! URL handling module for Site-Harvest
//!
//! This module provides reference resolution against a page URL, the crawl
//! scope rule, and file-extension extraction for image URLs.

mod extension;
mod resolve;
mod scope;

// Re-export main functions
pub use extension::path_extension;
pub use resolve::resolve_reference;
pub use scope::{in_scope, CrawlScope};
