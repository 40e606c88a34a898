//! Async single-writer wrapper around [`Orderbook`].
//!
//! A book instance is an exclusive resource: at most one submit or
//! composite read runs at a time. `SharedOrderbook` enforces that with a
//! per-book `tokio::sync::Mutex`, acquired at the entry of every operation
//! and released on all exit paths. The matching loop contains no await
//! points, so callers never observe a crossed or torn book, and all trades
//! from one submit precede all trades from the next in the log.
//!
//! Distinct books share no state and may live on independent tasks. The
//! plain [`Orderbook`] methods stay available for hosts that provide their
//! own exclusion.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::book::Orderbook;
use crate::types::{Request, Trade};

/// Clonable handle to a lock-protected order book.
#[derive(Debug, Clone, Default)]
pub struct SharedOrderbook {
    inner: Arc<Mutex<Orderbook>>,
}

impl SharedOrderbook {
    /// Create a handle to a new empty book.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Orderbook::new())),
        }
    }

    /// Create a handle with pre-allocated book capacity.
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Orderbook::with_capacity(order_capacity))),
        }
    }

    /// Process one request under the book lock.
    ///
    /// The full matching loop completes before the lock is released.
    pub async fn submit(&self, request: Request) {
        self.inner.lock().await.submit(request);
    }

    /// Best bid price from a consistent instantaneous state.
    pub async fn best_bid(&self) -> Option<u64> {
        self.inner.lock().await.best_bid()
    }

    /// Best ask price from a consistent instantaneous state.
    pub async fn best_ask(&self) -> Option<u64> {
        self.inner.lock().await.best_ask()
    }

    /// The `(best_bid, best_ask)` pair observed atomically with respect to
    /// concurrent submits.
    pub async fn spread(&self) -> (Option<u64>, Option<u64>) {
        self.inner.lock().await.spread()
    }

    /// Total number of resting orders.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Check if the book holds no resting orders.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// A copy of the trade log in append order.
    pub async fn trades(&self) -> Vec<Trade> {
        self.inner.lock().await.trades().to_vec()
    }

    /// Diagnostic ladder of the current book state.
    pub async fn snapshot(&self) -> String {
        self.inner.lock().await.snapshot()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
