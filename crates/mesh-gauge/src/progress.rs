//! Progress reporting and cancellation for long-running analysis.
//!
//! Analysis of a large mesh walks every face once. A [`ProgressTracker`]
//! counts processed faces and calls the user callback every
//! `check_interval` faces; a callback returning `false` cancels the run.
//!
//! # Example
//!
//! ```
//! use mesh_gauge::progress::{Progress, ProgressCallback};
//!
//! let callback: ProgressCallback = Box::new(|progress: &Progress| {
//!     eprintln!("{}% {}", progress.percent(), progress.message);
//!     true // return false to cancel
//! });
//! # let _ = callback;
//! ```

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Progress information passed to callbacks.
#[derive(Debug, Clone)]
pub struct Progress {
    /// Items processed so far.
    pub current: u64,

    /// Total number of items.
    pub total: u64,

    /// Human-readable message describing current operation.
    pub message: String,

    /// Elapsed time since operation started.
    pub elapsed: Duration,

    /// Estimated time remaining (if available).
    pub estimated_remaining: Option<Duration>,
}

impl Progress {
    /// Create a new progress report.
    pub fn new(current: u64, total: u64, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
            elapsed: Duration::ZERO,
            estimated_remaining: None,
        }
    }

    /// Get progress as a fraction (0.0 to 1.0).
    #[inline]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64) / (self.total as f64)
        }
    }

    /// Get progress as a percentage (0 to 100).
    #[inline]
    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }

    /// Check if the operation is complete.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }
}

/// Callback function for progress reporting.
///
/// Returns `true` to continue, `false` to request cancellation.
pub type ProgressCallback = Box<dyn Fn(&Progress) -> bool + Send + Sync>;

/// Counts processed items and throttles callbacks to every `check_interval`
/// items.
///
/// Owned by the single analysis loop that drives it, so it is not `Sync`.
#[derive(Debug)]
pub struct ProgressTracker {
    current: Cell<u64>,
    total: u64,
    check_interval: u64,
    cancelled: Cell<bool>,
    start_time: Instant,
}

impl ProgressTracker {
    /// Create a tracker that reports every `check_interval` items.
    ///
    /// An interval of zero is treated as one.
    pub fn new(total: u64, check_interval: u64) -> Self {
        Self {
            current: Cell::new(0),
            total,
            check_interval: check_interval.max(1),
            cancelled: Cell::new(false),
            start_time: Instant::now(),
        }
    }

    /// Set the current progress value.
    #[inline]
    pub fn set(&self, value: u64) {
        self.current.set(value);
    }

    /// Get the current progress value.
    #[inline]
    pub fn current(&self) -> u64 {
        self.current.get()
    }

    /// Get the total count.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Check if cancellation was requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Get elapsed time.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Estimate remaining time based on current progress.
    pub fn estimated_remaining(&self) -> Option<Duration> {
        let current = self.current();
        if current == 0 {
            return None;
        }

        let rate = current as f64 / self.elapsed().as_secs_f64();
        if rate > 0.0 && rate.is_finite() {
            let remaining = self.total.saturating_sub(current) as f64 / rate;
            Some(Duration::from_secs_f64(remaining))
        } else {
            None
        }
    }

    /// Create a Progress snapshot.
    pub fn snapshot(&self, message: impl Into<String>) -> Progress {
        Progress {
            current: self.current(),
            total: self.total,
            message: message.into(),
            elapsed: self.elapsed(),
            estimated_remaining: self.estimated_remaining(),
        }
    }

    /// Record `processed` items and call the callback when a checkpoint is
    /// reached (every `check_interval` items and at completion).
    ///
    /// Returns `false` if the callback requested cancellation, now or earlier.
    pub fn checkpoint(
        &self,
        processed: u64,
        callback: Option<&ProgressCallback>,
        message: &str,
    ) -> bool {
        self.set(processed);
        if self.is_cancelled() {
            return false;
        }

        let Some(callback) = callback else {
            return true;
        };
        if processed % self.check_interval != 0 && processed < self.total {
            return true;
        }

        let should_continue = callback(&self.snapshot(message));
        if !should_continue {
            self.cancel();
        }
        should_continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_progress_fraction() {
        let p = Progress::new(50, 100, "test");
        assert!((p.fraction() - 0.5).abs() < 1e-10);
        assert_eq!(p.percent(), 50);
        assert!(!p.is_complete());
        assert!(Progress::new(100, 100, "done").is_complete());
    }

    #[test]
    fn test_progress_zero_total() {
        let p = Progress::new(0, 0, "empty");
        assert_eq!(p.fraction(), 0.0);
        assert_eq!(p.percent(), 0);
    }

    #[test]
    fn test_checkpoint_interval() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();
        let callback: ProgressCallback = Box::new(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            true
        });

        let tracker = ProgressTracker::new(25, 10);
        for i in 1..=25 {
            assert!(tracker.checkpoint(i, Some(&callback), "faces"));
        }

        // 10, 20 and the final 25
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.current(), 25);
    }

    #[test]
    fn test_checkpoint_cancel_is_sticky() {
        let callback: ProgressCallback = Box::new(|p: &Progress| p.current < 4);
        let tracker = ProgressTracker::new(10, 2);

        assert!(tracker.checkpoint(2, Some(&callback), "faces"));
        assert!(!tracker.checkpoint(4, Some(&callback), "faces"));
        assert!(tracker.is_cancelled());
        assert!(!tracker.checkpoint(5, None, "faces"));
    }

    #[test]
    fn test_checkpoint_without_callback() {
        let tracker = ProgressTracker::new(3, 0);
        assert!(tracker.checkpoint(1, None, "faces"));
        assert_eq!(tracker.current(), 1);
        assert_eq!(tracker.snapshot("faces").total, 3);
    }
}
