//! Dispatch metrics for observability
//!
//! Counters for what happened to records that reached the central dispatch
//! bridge, plus the records the re-entrancy guard refused to publish.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for the dispatch bridge
///
/// # Example
///
/// ```
/// use hooklog::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
///
/// metrics.record_dropped();
/// metrics.record_written();
///
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.written_count(), 1);
/// ```
#[derive(Debug)]
pub struct DispatchMetrics {
    /// Records written to the sink
    written: AtomicU64,

    /// Records that could not be delivered (no sink, unknown channel)
    dropped: AtomicU64,

    /// Records below the sink threshold
    filtered: AtomicU64,

    /// Sink write errors
    failed_writes: AtomicU64,

    /// Records refused by the re-entrancy depth guard
    reentrancy_dropped: AtomicU64,
}

impl DispatchMetrics {
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            failed_writes: AtomicU64::new(0),
            reentrancy_dropped: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_write_count(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reentrancy_dropped_count(&self) -> u64 {
        self.reentrancy_dropped.load(Ordering::Relaxed)
    }

    /// Record a written entry, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed_write(&self) -> u64 {
        self.failed_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_reentrancy_dropped(&self) -> u64 {
        self.reentrancy_dropped.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of undeliverable records as a percentage (0.0 - 100.0)
    ///
    /// Filtered records are not counted; they were delivered as intended.
    pub fn drop_rate(&self) -> f64 {
        let lost = (self.dropped_count() + self.failed_write_count()) as f64;
        let total = self.written_count() as f64 + lost;
        if total == 0.0 {
            0.0
        } else {
            (lost / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.failed_writes.store(0, Ordering::Relaxed);
        self.reentrancy_dropped.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            written: AtomicU64::new(self.written_count()),
            dropped: AtomicU64::new(self.dropped_count()),
            filtered: AtomicU64::new(self.filtered_count()),
            failed_writes: AtomicU64::new(self.failed_write_count()),
            reentrancy_dropped: AtomicU64::new(self.reentrancy_dropped_count()),
        }
    }
}
