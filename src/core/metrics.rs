//! Logger metrics
//!
//! Counters for lines written, lines lost to sink failures and records that
//! could not be JSON-encoded. Calls below the level threshold touch none of them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing what a logger has done so far
///
/// # Example
///
/// ```
/// use rust_kvlog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.lines_written(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// assert_eq!(metrics.failure_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines handed to the sink successfully
    lines_written: AtomicU64,

    /// Lines the sink rejected
    write_failures: AtomicU64,

    /// Records replaced by the marshal-error substitute
    marshal_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            lines_written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            marshal_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn marshal_failures(&self) -> u64 {
        self.marshal_failures.load(Ordering::Relaxed)
    }

    /// Returns the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.lines_written.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the previous count
    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_marshal_failure(&self) -> u64 {
        self.marshal_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of attempted lines the sink rejected, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been written yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let total = self.lines_written() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.lines_written.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.marshal_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            lines_written: AtomicU64::new(self.lines_written()),
            write_failures: AtomicU64::new(self.write_failures()),
            marshal_failures: AtomicU64::new(self.marshal_failures()),
        }
    }
}
