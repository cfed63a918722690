//! Set of page URLs admitted for fetching during one crawl
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Tracks every URL the crawler has decided to fetch
///
/// The set only grows. Membership test and insertion happen under a single
/// lock acquisition, so when several tasks discover the same URL at once
/// exactly one of them is told to fetch it. The lock is never held across
/// I/O.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` as visited
    ///
    /// # Returns
    ///
    /// * `true` - The caller is the first to see this URL and owns its fetch
    /// * `false` - The URL was already admitted by someone else
    pub fn insert(&self, url: &str) -> bool {
        let mut urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_owned());
        true
    }

    /// Returns true if `url` has been admitted
    pub fn contains(&self, url: &str) -> bool {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url)
    }

    /// Number of admitted URLs
    pub fn len(&self) -> usize {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_first_insert_wins() {
        let visited = VisitedSet::new();
        assert!(visited.insert("https://example.com/a"));
        assert!(!visited.insert("https://example.com/a"));
        assert!(visited.insert("https://example.com/b"));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_contains() {
        let visited = VisitedSet::new();
        assert!(visited.is_empty());
        visited.insert("https://example.com/a");
        assert!(visited.contains("https://example.com/a"));
        assert!(!visited.contains("https://example.com/b"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_discovery_admits_exactly_one() {
        let visited = Arc::new(VisitedSet::new());
        let mut handles = Vec::new();

        for _ in 0..64 {
            let visited = Arc::clone(&visited);
            handles.push(tokio::spawn(async move {
                visited.insert("https://example.com/shared")
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 1);
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_concurrent_distinct_urls_all_admitted() {
        let visited = Arc::new(VisitedSet::new());

        std::thread::scope(|scope| {
            for _ in 0..16 {
                let visited = Arc::clone(&visited);
                scope.spawn(move || {
                    // Every thread races on the same 50 URLs
                    for j in 0..50 {
                        visited.insert(&format!("https://example.com/{}", j));
                    }
                });
            }
        });

        assert_eq!(visited.len(), 50);
    }
}
