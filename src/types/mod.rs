//! Core data types for tickmatch
//!
//! ## Types
//!
//! - [`Request`]: tagged inbound request (cancel, market, limit)
//! - [`Side`]: Buy or Sell
//! - [`LimitOrder`] / [`MarketOrder`] / [`CancelOrder`]: the request shapes
//! - [`Trade`]: an executed match between two orders
//!
//! ## Fixed-Point Prices
//!
//! Prices are stored as `u64` scaled by 10^8; see [`price`]. Quantities are
//! plain integral units.

mod request;
mod trade;
pub mod price;

// Re-export all types at module level
pub use request::{CancelOrder, LimitOrder, MarketOrder, OrderError, Request, Side};
pub use trade::Trade;
