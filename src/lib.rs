//! # tickmatch
//!
//! Single-instrument limit order book with price-time priority matching.
//!
//! ## Architecture
//!
//! - **Types**: request variants (cancel, market, limit), the priority
//!   relation, and immutable trade records
//! - **Book**: two-sided order book with slab-backed storage and the
//!   matching engine behind a single `submit` entry point
//! - **Clock**: strictly monotonic microsecond timestamp source
//!
//! ## Matching Rules
//!
//! 1. Better price executes first: highest bid, lowest ask
//! 2. At one price, earlier timestamp first, then smaller original size
//! 3. Trades always print at the resting order's price
//! 4. Unfilled limit remainders rest; market remainders are discarded
//!
//! ## Concurrency
//!
//! One book is a single-writer resource. [`SharedOrderbook`] wraps it in an
//! async mutex so submits and composite reads serialize; the sync
//! [`Orderbook`] assumes external exclusion.
//!
//! ## Example
//!
//! ```
//! use tickmatch::{Orderbook, Request, Side};
//! use tickmatch::types::price::parse_price;
//!
//! let mut book = Orderbook::new();
//! book.submit(Request::limit(1, Side::Sell, 100, parse_price("10.00").unwrap()).unwrap());
//! book.submit(Request::market(2, Side::Buy, 40).unwrap());
//!
//! assert_eq!(book.trades().len(), 1);
//! assert_eq!(book.trades()[0].size, 40);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: requests, sides, trades, fixed-point prices
pub mod types;

/// Order book: storage, matching, async lock wrapper
pub mod book;

/// Monotonic microsecond clock
pub mod clock;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{CancelOrder, LimitOrder, MarketOrder, OrderError, Request, Side, Trade};
pub use book::{Orderbook, OrderNode, PriceLevel, SharedOrderbook};
pub use clock::MonotonicClock;
