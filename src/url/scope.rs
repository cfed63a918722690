//! Crawl scope rule
//!
//! A discovered link is eligible for traversal when its absolute form starts
//! with the configured base URL. This is a plain string prefix test: no host
//! or path-segment parsing is involved, so under a base of
//! `https://example.com/blog` the link `https://example.com/blog-archive`
//! is in scope.
//!
//! Links reach the scope test after `Url::join`, which lowercases the host,
//! drops default ports and percent-encodes the path. [`CrawlScope`] therefore
//! matches against both the base as configured and its serialized form.

use url::Url;

/// Returns true if `candidate` falls inside the crawl scope rooted at `base`
///
/// # Examples
///
/// ```
/// use site_harvest::url::in_scope;
///
/// assert!(in_scope("https://example.com/blog", "https://example.com/blog/post1"));
/// assert!(!in_scope("https://example.com/blog", "https://example.com/other"));
/// ```
pub fn in_scope(base: &str, candidate: &str) -> bool {
    candidate.starts_with(base)
}

/// The scope of one crawl, rooted at a base URL
#[derive(Debug, Clone)]
pub struct CrawlScope {
    configured: String,
    normalized: Option<String>,
}

impl CrawlScope {
    /// Builds the scope for `base`
    ///
    /// The serialized form is only kept when it differs from the configured
    /// spelling.
    pub fn new(base: &str) -> Self {
        let normalized = Url::parse(base)
            .ok()
            .map(String::from)
            .filter(|normalized| normalized != base);

        Self {
            configured: base.to_string(),
            normalized,
        }
    }

    /// The base URL as configured
    pub fn base(&self) -> &str {
        &self.configured
    }

    /// Every spelling the base URL can take, configured form first
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.configured.as_str()).chain(self.normalized.as_deref())
    }

    /// Returns true if `candidate` starts with either spelling of the base
    ///
    /// # Examples
    ///
    /// ```
    /// use site_harvest::url::CrawlScope;
    ///
    /// let scope = CrawlScope::new("https://Example.com/blog");
    /// assert!(scope.contains("https://example.com/blog/post1"));
    /// assert!(scope.contains("https://Example.com/blog/post1"));
    /// assert!(!scope.contains("https://example.com/other"));
    /// ```
    pub fn contains(&self, candidate: &str) -> bool {
        self.spellings().any(|base| in_scope(base, candidate))
    }
}
