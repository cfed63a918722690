//! Site-Harvest: a single-site image harvester
//!
//! This crate crawls every page reachable under a base URL, follows only links
//! that stay inside that URL's prefix, and downloads every image it finds.
//! WEBP images are converted to PNG on the way to disk.

pub mod config;
pub mod crawler;
pub mod images;
pub mod output;
pub mod state;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Site-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required setting: {0}")]
    Missing(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised while fetching an HTML page
///
/// These never leave the task that fetched the page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Errors raised by a single image acquisition task
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("could not download image {url}: {source}")]
    Download { url: String, source: reqwest::Error },

    #[error("could not write {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not decode webp image {url}: {source}")]
    Decode {
        url: String,
        source: image::ImageError,
    },

    #[error("could not encode image to png: {0}")]
    Encode(#[source] image::ImageError),
}

/// Result type alias for Site-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{CrawlReport, Crawler};
pub use crate::images::{ImageFormatKind, ImagePipeline};
pub use crate::state::{ImageCounter, VisitedSet};
pub use crate::url::{in_scope, CrawlScope};
