//! Counter used to give every downloaded image a distinct file name
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide image sequence number
///
/// `next` is a single atomic increment-and-read, so no two image tasks can
/// observe the same value. The first value handed out is 1.
#[derive(Debug, Default)]
pub struct ImageCounter {
    last: AtomicU64,
}

impl ImageCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next sequence number
    pub fn next(&self) -> u64 {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of values handed out so far
    pub fn issued(&self) -> u64 {
        self.last.load(Ordering::SeqCst)
    }
}
