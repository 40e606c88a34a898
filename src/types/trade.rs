//! Trade type representing an executed match between two orders.

use serde::{Deserialize, Serialize};

use crate::types::request::Side;

/// One fill between an incoming order and a resting order.
///
/// ## Terminology
///
/// - **Book order (maker)**: the resting order that was already in the book
/// - **Incoming order (taker)**: the order that triggered the match
///
/// ## Price Discovery
///
/// The trade always executes at the resting order's price. The incoming
/// order's limit, when present, bounds participation but never the print
/// price.
///
/// A trade snapshots its fields at emission time; it holds no references to
/// mutable order state. Ordering is purely by position in the trade log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Execution timestamp in microseconds
    pub ts: u64,

    /// Aggressor side (the incoming order's side)
    pub side: Side,

    /// Execution price in fixed-point (scaled by 10^8); the resting
    /// order's price
    pub price: u64,

    /// Matched quantity
    pub size: u64,

    /// Id of the incoming (aggressor) order
    pub incoming_id: u64,

    /// Id of the resting (passive) order
    pub book_id: u64,
}

impl Trade {
    /// Create a new trade record.
    pub fn new(
        ts: u64,
        side: Side,
        price: u64,
        size: u64,
        incoming_id: u64,
        book_id: u64,
    ) -> Self {
        Self {
            ts,
            side,
            price,
            size,
            incoming_id,
            book_id,
        }
    }
}

impl std::fmt::Display for Trade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Executed: {} {} units at {}",
            self.side,
            self.size,
            crate::types::price::format_price_compact(self.price)
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_new() {
        let trade = Trade::new(1_703_577_600_000_000, Side::Buy, 10_050_000_000, 50, 3, 2);

        assert_eq!(trade.ts, 1_703_577_600_000_000);
        assert_eq!(trade.side, Side::Buy);
        assert_eq!(trade.price, 10_050_000_000);
        assert_eq!(trade.size, 50);
        assert_eq!(trade.incoming_id, 3);
        assert_eq!(trade.book_id, 2);
    }

    #[test]
    fn test_trade_display() {
        let trade = Trade::new(0, Side::Sell, 10_000_000_000, 25, 9, 4);
        assert_eq!(trade.to_string(), "Executed: SELL 25 units at 100");
    }
}
