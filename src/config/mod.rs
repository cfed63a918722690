//! Configuration module for Site-Harvest
//!
//! The crawler needs two values, a base URL and a download directory, plus a
//! few optional limits. They can come from a TOML file, from the
//! `WEBSITE_URL` / `DOWNLOAD_DIR` environment variables, or from the command
//! line.
//!
//! # Example
//!
//! ```no_run
//! use site_harvest::config::{load_config, ConfigOverrides};
//! use std::path::Path;
//!
//! let config = load_config(Some(Path::new("harvest.toml")), &ConfigOverrides::default()).unwrap();
//! println!("Images go to: {}", config.output.download_dir.display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ConfigOverrides, CrawlerConfig, FileConfig, FileCrawlerConfig, FileOutputConfig,
    OutputConfig, DEFAULT_MAX_CONCURRENT_IMAGES, DEFAULT_MAX_CONCURRENT_PAGES, ENV_DOWNLOAD_DIR,
    ENV_WEBSITE_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, parse_config_file, resolve_config};
pub use validation::validate;
