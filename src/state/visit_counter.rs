use std::sync::atomic::{AtomicU64, Ordering};

/// Counts page visits for one crawl run
///
/// Shared between concurrently running visits; every increment is atomic so
/// the numbers in the log are unique and gap-free.
#[derive(Debug, Default)]
pub struct VisitCounter {
    count: AtomicU64,
}

impl VisitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit and logs `|<count>| Spider on: <url>`
    ///
    /// # Returns
    ///
    /// The count including this visit
    pub fn record(&self, url: &str) -> u64 {
        let count = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!("|{}| Spider on: {}", count, url);
        count
    }

    /// Number of visits recorded so far
    pub fn get(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }
}
