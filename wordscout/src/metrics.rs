use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Counters shared by every worker of a batch.
///
/// All updates are relaxed atomic increments; the counters are diagnostics
/// only and the match total reported to callers never comes from here.
#[derive(Debug, Clone)]
pub struct SearchMetrics {
    // Input metrics
    haystack_bytes: Arc<AtomicU64>,
    mapped_bytes: Arc<AtomicU64>,
    queries_loaded: Arc<AtomicU64>,

    // Matching metrics
    queries_searched: Arc<AtomicU64>,
    queries_skipped: Arc<AtomicU64>,
    matches: Arc<AtomicU64>,
}

impl SearchMetrics {
    /// Creates a new SearchMetrics instance
    pub fn new() -> Self {
        Self {
            haystack_bytes: Arc::new(AtomicU64::new(0)),
            mapped_bytes: Arc::new(AtomicU64::new(0)),
            queries_loaded: Arc::new(AtomicU64::new(0)),
            queries_searched: Arc::new(AtomicU64::new(0)),
            queries_skipped: Arc::new(AtomicU64::new(0)),
            matches: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records the haystack size and whether it was memory mapped
    pub fn record_haystack(&self, bytes: u64, mapped: bool) {
        self.haystack_bytes.fetch_add(bytes, Ordering::Relaxed);
        if mapped {
            self.mapped_bytes.fetch_add(bytes, Ordering::Relaxed);
        }
        debug!("Haystack loaded: {} bytes (mapped: {})", bytes, mapped);
    }

    /// Records how many query lines were read
    pub fn record_queries_loaded(&self, count: u64) {
        self.queries_loaded.fetch_add(count, Ordering::Relaxed);
    }

    /// Records the outcome of one searched query
    pub fn record_search(&self, matched: bool) {
        self.queries_searched.fetch_add(1, Ordering::Relaxed);
        if matched {
            self.matches.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Records a query that was not searched
    pub fn record_skip(&self) {
        self.queries_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Gets a snapshot of the counters
    pub fn get_stats(&self) -> SearchStats {
        SearchStats {
            haystack_bytes: self.haystack_bytes.load(Ordering::Relaxed),
            mapped_bytes: self.mapped_bytes.load(Ordering::Relaxed),
            queries_loaded: self.queries_loaded.load(Ordering::Relaxed),
            queries_searched: self.queries_searched.load(Ordering::Relaxed),
            queries_skipped: self.queries_skipped.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
        }
    }

    /// Logs a snapshot of the counters
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Search stats:\n\
             Haystack: {} bytes ({} mapped)\n\
             Queries loaded: {}\n\
             Queries searched/skipped: {}/{}\n\
             Matches: {}",
            stats.haystack_bytes,
            stats.mapped_bytes,
            stats.queries_loaded,
            stats.queries_searched,
            stats.queries_skipped,
            stats.matches
        );
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`SearchMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub haystack_bytes: u64,
    pub mapped_bytes: u64,
    pub queries_loaded: u64,
    pub queries_searched: u64,
    pub queries_skipped: u64,
    pub matches: u64,
}
