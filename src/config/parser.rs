use crate::config::types::{
    Config, ConfigOverrides, CrawlerConfig, FileConfig, OutputConfig,
    DEFAULT_MAX_CONCURRENT_IMAGES, DEFAULT_MAX_CONCURRENT_PAGES, ENV_DOWNLOAD_DIR,
    ENV_WEBSITE_URL,
};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::Duration;

/// Loads the crawler configuration from every source
///
/// Sources, lowest to highest precedence:
/// 1. Built-in defaults
/// 2. The TOML file at `path`, if one is given
/// 3. `WEBSITE_URL` / `DOWNLOAD_DIR` environment variables
/// 4. `cli` overrides
///
/// # Arguments
///
/// * `path` - Optional path to a TOML configuration file
/// * `cli` - Values supplied on the command line
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - A source could not be read, or a required value is
///   missing or invalid
///
/// # Example
///
/// ```no_run
/// use site_harvest::config::{load_config, ConfigOverrides};
///
/// let config = load_config(None, &ConfigOverrides::default()).unwrap();
/// println!("Crawling {}", config.crawler.base_url);
/// ```
pub fn load_config(path: Option<&Path>, cli: &ConfigOverrides) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => parse_config_file(path)?,
        None => FileConfig::default(),
    };

    resolve_config(file, &ConfigOverrides::from_env(), cli)
}

/// Reads and parses a TOML configuration file without validating it
pub fn parse_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Merges file values with environment and CLI overrides and validates the
/// result
pub fn resolve_config(
    file: FileConfig,
    env: &ConfigOverrides,
    cli: &ConfigOverrides,
) -> Result<Config, ConfigError> {
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env.base_url.clone())
        .or(file.crawler.base_url)
        .ok_or_else(|| ConfigError::Missing(format!("base URL ({})", ENV_WEBSITE_URL)))?;

    let download_dir = cli
        .download_dir
        .clone()
        .or_else(|| env.download_dir.clone())
        .or(file.output.download_dir)
        .ok_or_else(|| ConfigError::Missing(format!("download directory ({})", ENV_DOWNLOAD_DIR)))?;

    let config = Config {
        crawler: CrawlerConfig {
            base_url,
            max_concurrent_pages: file
                .crawler
                .max_concurrent_pages
                .unwrap_or(DEFAULT_MAX_CONCURRENT_PAGES),
            max_concurrent_images: file
                .crawler
                .max_concurrent_images
                .unwrap_or(DEFAULT_MAX_CONCURRENT_IMAGES),
            request_timeout: file.crawler.request_timeout_secs.map(Duration::from_secs),
            parse_error_responses: file.crawler.parse_error_responses.unwrap_or(false),
        },
        output: OutputConfig { download_dir },
    };

    validate(&config)?;

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two runs can be told apart by the settings they
/// used.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn overrides(base_url: Option<&str>, download_dir: Option<&str>) -> ConfigOverrides {
        ConfigOverrides {
            base_url: base_url.map(str::to_string),
            download_dir: download_dir.map(PathBuf::from),
        }
    }

    #[test]
    fn test_parse_full_config_file() {
        let file = create_temp_config(
            r#"
[crawler]
base-url = "https://example.com/blog"
max-concurrent-pages = 3
max-concurrent-images = 5
request-timeout-secs = 20
parse-error-responses = true

[output]
download-dir = "./downloads"
"#,
        );

        let parsed = parse_config_file(file.path()).unwrap();
        let config =
            resolve_config(parsed, &ConfigOverrides::default(), &ConfigOverrides::default())
                .unwrap();

        assert_eq!(config.crawler.base_url, "https://example.com/blog");
        assert_eq!(config.crawler.max_concurrent_pages, 3);
        assert_eq!(config.crawler.max_concurrent_images, 5);
        assert_eq!(config.crawler.request_timeout, Some(Duration::from_secs(20)));
        assert!(config.crawler.parse_error_responses);
        assert_eq!(config.output.download_dir, PathBuf::from("./downloads"));
    }

    #[test]
    fn test_defaults_when_file_omits_limits() {
        let file = create_temp_config(
            r#"
[crawler]
base-url = "https://example.com/"

[output]
download-dir = "out"
"#,
        );

        let parsed = parse_config_file(file.path()).unwrap();
        let config =
            resolve_config(parsed, &ConfigOverrides::default(), &ConfigOverrides::default())
                .unwrap();

        assert_eq!(config.crawler.max_concurrent_pages, DEFAULT_MAX_CONCURRENT_PAGES);
        assert_eq!(config.crawler.max_concurrent_images, DEFAULT_MAX_CONCURRENT_IMAGES);
        assert_eq!(config.crawler.request_timeout, None);
        assert!(!config.crawler.parse_error_responses);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig {
            crawler: crate::config::types::FileCrawlerConfig {
                base_url: Some("https://file.example.com/".to_string()),
                ..Default::default()
            },
            output: crate::config::types::FileOutputConfig {
                download_dir: Some(PathBuf::from("file-dir")),
            },
        };
        let env = overrides(Some("https://env.example.com/"), None);

        let config = resolve_config(file, &env, &ConfigOverrides::default()).unwrap();

        assert_eq!(config.crawler.base_url, "https://env.example.com/");
        assert_eq!(config.output.download_dir, PathBuf::from("file-dir"));
    }

    #[test]
    fn test_cli_overrides_env() {
        let env = overrides(Some("https://env.example.com/"), Some("env-dir"));
        let cli = overrides(Some("https://cli.example.com/"), Some("cli-dir"));

        let config = resolve_config(FileConfig::default(), &env, &cli).unwrap();

        assert_eq!(config.crawler.base_url, "https://cli.example.com/");
        assert_eq!(config.output.download_dir, PathBuf::from("cli-dir"));
    }

    #[test]
    fn test_missing_base_url() {
        let env = overrides(None, Some("out"));
        let result = resolve_config(FileConfig::default(), &env, &ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::Missing(_))));
    }

    #[test]
    fn test_missing_download_dir() {
        let env = overrides(Some("https://example.com/"), None);
        let result = resolve_config(FileConfig::default(), &env, &ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::Missing(_))));
    }

    #[test]
    fn test_env_lookup_ignores_empty_values() {
        let env = ConfigOverrides::from_lookup(|key| match key {
            "WEBSITE_URL" => Some("https://example.com/".to_string()),
            "DOWNLOAD_DIR" => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(env.base_url.as_deref(), Some("https://example.com/"));
        assert_eq!(env.download_dir, None);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = parse_config_file(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = parse_config_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }
}
