//! Logger metrics for observability
//!
//! Counters shared by a logger and every logger derived from it.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use logx::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_emitted();
/// metrics.record_sink_failure();
///
/// assert_eq!(metrics.emitted(), 1);
/// assert_eq!(metrics.sink_failures(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Records written to every sink without error
    emitted: AtomicU64,

    /// Records below the minimum severity
    filtered: AtomicU64,

    /// Records that at least one sink failed to write
    sink_failures: AtomicU64,

    /// Records emitted untransformed because the formatter panicked
    formatter_fallbacks: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            formatter_fallbacks: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn formatter_fallbacks(&self) -> u64 {
        self.formatter_fallbacks.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_formatter_fallback(&self) -> u64 {
        self.formatter_fallbacks.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of written records that hit a sink failure, as a percentage
    ///
    /// Returns 0.0 if nothing has been written yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.sink_failures() as f64;
        let total = failed + self.emitted() as f64;
        if total == 0.0 {
            0.0
        } else {
            failed / total * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.formatter_fallbacks.store(0, Ordering::Relaxed);
    }
}
