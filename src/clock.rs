//! Monotonic microsecond timestamp source.
//!
//! ## Contract
//!
//! Order timestamps drive time priority, so they must be strictly
//! monotonic within one process even when the OS clock steps backwards.
//! `MonotonicClock` reads epoch microseconds from `SystemTime` and clamps:
//! if a reading is less than or equal to the previous one, it is bumped to
//! `previous + 1`.
//!
//! Every reading is therefore unique and strictly increasing, which keeps
//! the time tie-break stable without trusting the OS clock for ordering.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Strictly monotonic source of epoch microseconds.
///
/// # Example
///
/// ```
/// use tickmatch::clock::MonotonicClock;
///
/// let clock = MonotonicClock::new();
/// let a = clock.now_micros();
/// let b = clock.now_micros();
/// assert!(b > a);
/// ```
#[derive(Debug, Default)]
pub struct MonotonicClock {
    /// Last timestamp handed out
    last: AtomicU64,
}

impl MonotonicClock {
    /// Create a new clock with no prior readings.
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Current epoch time in microseconds, strictly greater than any
    /// previous reading from this clock.
    pub fn now_micros(&self) -> u64 {
        let raw = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0);

        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = raw.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(observed) => prev = observed,
            }
        }
    }
}

/// Process-wide clock backing the default request constructors and trade
/// stamping.
static CLOCK: MonotonicClock = MonotonicClock::new();

/// Read the process-wide monotonic clock.
#[inline]
pub fn now_micros() -> u64 {
    CLOCK.now_micros()
}

// ============================================================================
// Unit Tests
// ============================================================================
