//! Request types for the tickmatch engine.
//!
//! ## Request Variants
//!
//! Inbound requests are a tagged enum with three shapes:
//!
//! - [`CancelOrder`]: remove a resting order by id
//! - [`MarketOrder`]: execute against the opposite side at any price
//! - [`LimitOrder`]: execute up to a price bound, rest the remainder
//!
//! Each variant carries the caller-supplied `id` and a microsecond
//! timestamp assigned exactly once at construction. A cancel carries no
//! side, size, or price; those fields do not exist on the type.
//!
//! ## Priority
//!
//! Resting limit orders on one side are ordered by [`LimitOrder::priority_cmp`]:
//! better price first (higher for buys, lower for sells), then earlier
//! timestamp, then smaller original size. The size key is compared on the
//! original quantity, which never mutates, so a partially filled order
//! keeps its rank when it returns to the book.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock;
use crate::types::price;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Represented as u8 on the wire:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    /// Buy order (bid) - wants to purchase the asset
    #[default]
    Buy,
    /// Sell order (ask) - wants to sell the asset
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

// ============================================================================
// Construction errors
// ============================================================================

/// Rejections raised while constructing a request.
///
/// Ill-formed requests are refused here so they are never representable in
/// book state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("order size must be positive")]
    ZeroSize,
}

// ============================================================================
// Request variants
// ============================================================================

/// Cancellation of a resting order by id.
///
/// Cancels carry no side, size, or price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrder {
    /// Id of the order to remove
    pub id: u64,

    /// Microsecond timestamp assigned at construction
    pub ts: u64,
}

impl CancelOrder {
    /// Create a cancel request stamped from the process clock.
    pub fn new(id: u64) -> Self {
        Self::new_at(id, clock::now_micros())
    }

    /// Create a cancel request with a caller-supplied timestamp.
    pub fn new_at(id: u64, ts: u64) -> Self {
        Self { id, ts }
    }
}

impl fmt::Display for CancelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cancel Order: {}", self.id)
    }
}

/// Order executed against the opposite side at any available price.
///
/// Any quantity left after the opposite side is exhausted is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrder {
    /// Caller-supplied unique identifier
    pub id: u64,

    /// Microsecond timestamp assigned at construction
    pub ts: u64,

    /// Buy or Sell
    pub side: Side,

    /// Original quantity
    pub size: u64,

    /// Unfilled quantity, decremented by the matching engine
    pub remaining: u64,
}

impl MarketOrder {
    /// Create a market order stamped from the process clock.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::ZeroSize`] when `size == 0`.
    pub fn new(id: u64, side: Side, size: u64) -> Result<Self, OrderError> {
        Self::new_at(id, side, size, clock::now_micros())
    }

    /// Create a market order with a caller-supplied timestamp.
    pub fn new_at(id: u64, side: Side, size: u64, ts: u64) -> Result<Self, OrderError> {
        if size == 0 {
            return Err(OrderError::ZeroSize);
        }
        Ok(Self {
            id,
            ts,
            side,
            size,
            remaining: size,
        })
    }
}

impl fmt::Display for MarketOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Market Order: {} {} units", self.side, self.remaining)
    }
}

/// Order executed up to a price bound; the remainder rests in the book.
///
/// ## Example
///
/// ```
/// use tickmatch::types::{LimitOrder, Side};
/// use tickmatch::types::price::parse_price;
///
/// let order = LimitOrder::new(1, Side::Buy, 100, parse_price("99.50").unwrap()).unwrap();
/// assert_eq!(order.remaining, 100);
/// assert!(!order.is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrder {
    /// Caller-supplied unique identifier
    pub id: u64,

    /// Microsecond timestamp assigned at construction
    pub ts: u64,

    /// Buy or Sell
    pub side: Side,

    /// Original quantity; never mutated after construction
    pub size: u64,

    /// Unfilled quantity, decremented by the matching engine
    pub remaining: u64,

    /// Price bound in fixed-point (scaled by 10^8)
    pub price: u64,
}

impl LimitOrder {
    /// Create a limit order stamped from the process clock.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::ZeroSize`] when `size == 0`.
    pub fn new(id: u64, side: Side, size: u64, price: u64) -> Result<Self, OrderError> {
        Self::new_at(id, side, size, price, clock::now_micros())
    }

    /// Create a limit order with a caller-supplied timestamp.
    pub fn new_at(
        id: u64,
        side: Side,
        size: u64,
        price: u64,
        ts: u64,
    ) -> Result<Self, OrderError> {
        if size == 0 {
            return Err(OrderError::ZeroSize);
        }
        Ok(Self {
            id,
            ts,
            side,
            size,
            remaining: size,
            price,
        })
    }

    /// Check if the order is fully filled
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Get the filled quantity
    #[inline]
    pub fn filled_quantity(&self) -> u64 {
        self.size.saturating_sub(self.remaining)
    }

    /// Fill a portion of this order.
    ///
    /// # Returns
    ///
    /// The actual quantity filled (capped at the remaining quantity).
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.remaining);
        self.remaining -= actual_fill;
        actual_fill
    }

    /// Compare priority against another resting order on the same side.
    ///
    /// `Ordering::Less` means `self` executes first: better price (higher
    /// for buys, lower for sells), then earlier timestamp, then smaller
    /// original size. At identical price and timestamp the smaller resting
    /// quantity is executed first.
    pub fn priority_cmp(&self, other: &LimitOrder) -> Ordering {
        debug_assert_eq!(self.side, other.side, "priority is defined per side");

        let by_price = match self.side {
            Side::Buy => other.price.cmp(&self.price),
            Side::Sell => self.price.cmp(&other.price),
        };

        by_price
            .then(self.ts.cmp(&other.ts))
            .then(self.size.cmp(&other.size))
    }

    /// True when `self` has strictly better priority than `other`.
    #[inline]
    pub fn ranks_before(&self, other: &LimitOrder) -> bool {
        self.priority_cmp(other) == Ordering::Less
    }
}

impl fmt::Display for LimitOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Limit Order: {} {} units at {}",
            self.side,
            self.remaining,
            price::format_price_compact(self.price)
        )
    }
}

// ============================================================================
// Request enum
// ============================================================================

/// An inbound request: the engine routes on the variant tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    /// Remove a resting order by id
    Cancel(CancelOrder),
    /// Execute at any price, discard the remainder
    Market(MarketOrder),
    /// Execute up to the price bound, rest the remainder
    Limit(LimitOrder),
}

impl Request {
    /// Build a cancel request.
    pub fn cancel(id: u64) -> Self {
        Request::Cancel(CancelOrder::new(id))
    }

    /// Build a market order request.
    pub fn market(id: u64, side: Side, size: u64) -> Result<Self, OrderError> {
        Ok(Request::Market(MarketOrder::new(id, side, size)?))
    }

    /// Build a limit order request.
    pub fn limit(id: u64, side: Side, size: u64, price: u64) -> Result<Self, OrderError> {
        Ok(Request::Limit(LimitOrder::new(id, side, size, price)?))
    }

    /// The caller-supplied order id.
    pub fn id(&self) -> u64 {
        match self {
            Request::Cancel(c) => c.id,
            Request::Market(m) => m.id,
            Request::Limit(l) => l.id,
        }
    }

    /// The construction timestamp in microseconds.
    pub fn ts(&self) -> u64 {
        match self {
            Request::Cancel(c) => c.ts,
            Request::Market(m) => m.ts,
            Request::Limit(l) => l.ts,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
