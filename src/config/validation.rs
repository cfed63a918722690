use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_base_url(&config.base_url)?;

    if config.max_concurrent_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-pages must be >= 1, got {}",
            config.max_concurrent_pages
        )));
    }

    if config.max_concurrent_images < 1 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-images must be >= 1, got {}",
            config.max_concurrent_images
        )));
    }

    if let Some(timeout) = config.request_timeout {
        if timeout.is_zero() {
            return Err(ConfigError::Validation(
                "request-timeout-secs must be > 0".to_string(),
            ));
        }
    }

    Ok(())
}

/// The base URL doubles as the crawl root and the scope prefix, so it must
/// be an absolute http(s) URL with a host
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base URL '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Base URL '{}' must use http or https",
            base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Base URL '{}' has no host",
            base_url
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.download_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "download-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
