use serde::Serialize;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Default)]
struct InnerMetrics {
    records_fetched: AtomicU64,
    records_found: AtomicU64,
    records_missing: AtomicU64,
    fetch_failures: AtomicU64,
    rows_written: AtomicU64,
    batches_dispatched: AtomicU64,
    batches_committed: AtomicU64,
    batches_failed: AtomicU64,
}

/// Shared run counters. Clones observe the same values.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<InnerMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub records_fetched: u64,
    pub records_found: u64,
    pub records_missing: u64,
    pub fetch_failures: u64,
    pub rows_written: u64,
    pub batches_dispatched: u64,
    pub batches_committed: u64,
    pub batches_failed: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Metrics {
            inner: Arc::new(InnerMetrics::default()),
        }
    }

    pub fn record_found(&self) {
        self.inner.records_fetched.fetch_add(1, Ordering::Relaxed);
        self.inner.records_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing(&self) {
        self.inner.records_fetched.fetch_add(1, Ordering::Relaxed);
        self.inner.records_missing.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.inner.records_fetched.fetch_add(1, Ordering::Relaxed);
        self.inner.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rows(&self, count: u64) {
        self.inner.rows_written.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_dispatched(&self) {
        self.inner.batches_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_committed(&self) {
        self.inner.batches_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_failed_batches(&self) {
        self.inner.batches_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_fetched: self.inner.records_fetched.load(Ordering::Relaxed),
            records_found: self.inner.records_found.load(Ordering::Relaxed),
            records_missing: self.inner.records_missing.load(Ordering::Relaxed),
            fetch_failures: self.inner.fetch_failures.load(Ordering::Relaxed),
            rows_written: self.inner.rows_written.load(Ordering::Relaxed),
            batches_dispatched: self.inner.batches_dispatched.load(Ordering::Relaxed),
            batches_committed: self.inner.batches_committed.load(Ordering::Relaxed),
            batches_failed: self.inner.batches_failed.load(Ordering::Relaxed),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
