//! HTTP fetcher implementation
//!
//! This module handles page requests for the traversal engine:
//! - Building the shared HTTP client
//! - GET requests for HTML pages
//! - Deciding which responses are worth scanning for references
//!
//! Requests carry no custom headers, cookies, or credentials. Redirects are
//! followed by the client, and references are later resolved against the
//! final URL.

use crate::config::CrawlerConfig;
use crate::FetchError;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

/// A fetched page, ready to be scanned
#[derive(Debug, Clone)]
pub struct PageDocument {
    /// Final URL after redirects; relative references resolve against it
    pub url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Whether the response declared (or defaulted to) an HTML body
    pub is_html: bool,

    /// Response body
    pub body: String,
}

/// Builds the HTTP client shared by page and image requests
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_harvest::config::Config;
/// use site_harvest::crawler::build_http_client;
///
/// let config = Config::new("https://example.com/", "./downloads");
/// let client = build_http_client(&config.crawler).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();

    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// Fetches a page
///
/// # Status Handling
///
/// | Condition | Result |
/// |-----------|--------|
/// | Transport failure | `FetchError::Network` |
/// | Body cannot be read | `FetchError::Network` |
/// | Non-2xx, `parse_error_responses == false` | `FetchError::Status` |
/// | Non-2xx, `parse_error_responses == true` | `Ok(PageDocument)` |
/// | 2xx | `Ok(PageDocument)` |
///
/// A response whose Content-Type is present and does not mention `html` is
/// returned with `is_html == false`; the parser yields no references for it.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `parse_error_responses` - Whether error pages are still scanned
pub async fn fetch_page(
    client: &Client,
    url: &str,
    parse_error_responses: bool,
) -> Result<PageDocument, FetchError> {
    let network_error = |source: reqwest::Error| FetchError::Network {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(network_error)?;

    let status = response.status();
    if !status.is_success() && !parse_error_responses {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let is_html = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(true, |ct| ct.to_ascii_lowercase().contains("html"));

    let body = response.text().await.map_err(network_error)?;

    Ok(PageDocument {
        url: final_url,
        status_code: status.as_u16(),
        is_html,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::time::Duration;

    #[test]
    fn test_build_http_client() {
        let config = Config::new("https://example.com/", "out");
        assert!(build_http_client(&config.crawler).is_ok());
    }

    #[test]
    fn test_build_http_client_with_timeout() {
        let mut config = Config::new("https://example.com/", "out");
        config.crawler.request_timeout = Some(Duration::from_secs(5));
        assert!(build_http_client(&config.crawler).is_ok());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = Client::new();
        let result = fetch_page(&client, "http://127.0.0.1:1/", false).await;
        assert!(matches!(result, Err(FetchError::Network { .. })));
    }
}
