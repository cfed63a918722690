use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of page fetches allowed in flight at once
pub const DEFAULT_MAX_CONCURRENT_PAGES: usize = 8;

/// Default number of image downloads allowed in flight at once
pub const DEFAULT_MAX_CONCURRENT_IMAGES: usize = 16;

/// Environment variable holding the base URL
pub const ENV_WEBSITE_URL: &str = "WEBSITE_URL";

/// Environment variable holding the download directory
pub const ENV_DOWNLOAD_DIR: &str = "DOWNLOAD_DIR";

/// Fully resolved configuration used by the crawler
#[derive(Debug, Clone)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Builds a configuration with default limits for the given site and
    /// download directory
    pub fn new(base_url: impl Into<String>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            crawler: CrawlerConfig {
                base_url: base_url.into(),
                max_concurrent_pages: DEFAULT_MAX_CONCURRENT_PAGES,
                max_concurrent_images: DEFAULT_MAX_CONCURRENT_IMAGES,
                request_timeout: None,
                parse_error_responses: false,
            },
            output: OutputConfig {
                download_dir: download_dir.into(),
            },
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Crawl root, also used verbatim as the scope prefix
    pub base_url: String,

    /// Maximum number of concurrent page fetches
    pub max_concurrent_pages: usize,

    /// Maximum number of concurrent image downloads
    pub max_concurrent_images: usize,

    /// Per-request timeout; None waits indefinitely
    pub request_timeout: Option<Duration>,

    /// Scan pages for links even when the server answered with an error status
    pub parse_error_responses: bool,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Directory images are written into, created if absent
    pub download_dir: PathBuf,
}

/// Configuration as it appears in a TOML file
///
/// Every field is optional: values may come from the environment or the
/// command line instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub crawler: FileCrawlerConfig,
    #[serde(default)]
    pub output: FileOutputConfig,
}

/// `[crawler]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileCrawlerConfig {
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    #[serde(rename = "max-concurrent-pages")]
    pub max_concurrent_pages: Option<usize>,

    #[serde(rename = "max-concurrent-images")]
    pub max_concurrent_images: Option<usize>,

    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,

    #[serde(rename = "parse-error-responses")]
    pub parse_error_responses: Option<bool>,
}

/// `[output]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileOutputConfig {
    #[serde(rename = "download-dir")]
    pub download_dir: Option<PathBuf>,
}

/// The two settings that can be supplied outside the config file, either
/// through environment variables or command-line flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub download_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Reads `WEBSITE_URL` and `DOWNLOAD_DIR` from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through an arbitrary variable lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            base_url: non_empty(ENV_WEBSITE_URL),
            download_dir: non_empty(ENV_DOWNLOAD_DIR).map(PathBuf::from),
        }
    }
}
