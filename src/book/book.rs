//! Central limit order book and matching engine.
//!
//! ## Architecture
//!
//! The book uses a hybrid data structure:
//!
//! - **Slab**: arena storage for resting orders, O(1) node operations
//! - **BTreeMap**: sorted price levels per side, O(log n) insert, O(1) peek
//! - **HashMap**: order id to slab key mapping for O(1) cancel
//!
//! ## Price Ordering
//!
//! - **Bids** (buy orders): sorted high-to-low (best bid = highest price)
//! - **Asks** (sell orders): sorted low-to-high (best ask = lowest price)
//!
//! Within a level, orders are queued by timestamp, then original size; the
//! head of the best level is the priority minimum for the side.
//!
//! ## Matching
//!
//! [`Orderbook::submit`] routes on the request variant. Marketable orders
//! repeatedly pop the best opposite order, print a trade at the resting
//! order's price, and reinsert a partially filled passive order. Unfilled
//! limit remainders rest; market remainders are discarded. The book is
//! never left crossed between submits.
//!
//! ## Example
//!
//! ```
//! use tickmatch::book::Orderbook;
//! use tickmatch::types::{Request, Side};
//! use tickmatch::types::price::parse_price;
//!
//! let mut book = Orderbook::new();
//!
//! book.submit(Request::limit(1, Side::Buy, 100, parse_price("99.50").unwrap()).unwrap());
//! book.submit(Request::limit(2, Side::Sell, 100, parse_price("100.50").unwrap()).unwrap());
//!
//! assert_eq!(book.best_bid(), parse_price("99.50"));
//! assert_eq!(book.best_ask(), parse_price("100.50"));
//! assert!(book.trades().is_empty());
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use slab::Slab;
use tracing::{debug, trace};

use crate::book::{OrderNode, PriceLevel};
use crate::clock;
use crate::types::price::format_price_compact;
use crate::types::{LimitOrder, Request, Side, Trade};

/// True when an incoming order at `incoming_price` crosses a resting order
/// at `resting_price`.
///
/// A buy crosses when it bids at least the resting ask; a sell crosses when
/// it offers at most the resting bid.
fn crosses(incoming_side: Side, incoming_price: u64, resting_price: u64) -> bool {
    match incoming_side {
        Side::Buy => incoming_price >= resting_price,
        Side::Sell => incoming_price <= resting_price,
    }
}

/// Central limit order book with price-time priority matching.
///
/// Owns the two sides, the resting order arena, and the append-only trade
/// log. Not internally synchronized; wrap in
/// [`SharedOrderbook`](crate::book::SharedOrderbook) for concurrent use, or
/// provide external exclusion.
#[derive(Debug)]
pub struct Orderbook {
    /// Arena holding every resting order
    orders: Slab<OrderNode>,

    /// Bid price levels (sorted high to low via Reverse keys)
    bids: BTreeMap<Reverse<u64>, PriceLevel>,

    /// Ask price levels (sorted low to high)
    asks: BTreeMap<u64, PriceLevel>,

    /// Order id to slab key mapping (for O(1) cancel)
    order_index: HashMap<u64, usize>,

    /// Executed trades in execution order, append-only
    trades: Vec<Trade>,

    /// Total number of resting bid orders
    bid_count: usize,

    /// Total number of resting ask orders
    ask_count: usize,
}

impl Default for Orderbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Orderbook {
    /// Create a new empty order book
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an order book whose arena and id index are sized for the
    /// expected number of resting orders up front.
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_index: HashMap::with_capacity(order_capacity),
            trades: Vec::new(),
            bid_count: 0,
            ask_count: 0,
        }
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Process one request.
    ///
    /// Routes on the variant tag:
    ///
    /// - *Cancel*: remove the order with the given id from either side.
    ///   Unknown ids are a silent no-op.
    /// - *Market*: match against the opposite side until it is exhausted or
    ///   the order is filled; any remainder is discarded.
    /// - *Limit*: match while the opposite best price crosses the limit;
    ///   a positive remainder rests on the order's own side.
    ///
    /// Trades print at the resting order's price and are appended to the
    /// trade log in execution order. Requests that can neither match nor
    /// rest produce no trades and no state change.
    pub fn submit(&mut self, request: Request) {
        match request {
            Request::Cancel(cancel) => {
                if self.cancel(cancel.id).is_some() {
                    debug!(id = cancel.id, "order cancelled");
                }
            }
            Request::Market(mut market) => {
                self.execute(market.side, market.id, &mut market.remaining, None);
                if market.remaining > 0 {
                    trace!(
                        id = market.id,
                        discarded = market.remaining,
                        "market remainder discarded"
                    );
                }
            }
            Request::Limit(mut limit) => {
                self.execute(limit.side, limit.id, &mut limit.remaining, Some(limit.price));
                if limit.remaining > 0 {
                    self.insert_limit(limit);
                }
            }
        }

        self.debug_check_uncrossed();
    }

    /// Pop-fill-reinsert loop shared by the market and limit paths.
    ///
    /// Matches the incoming order (identified by `side`, `id`, and its
    /// mutable remaining quantity) against the opposite side. `limit_price`
    /// bounds participation for limit orders; `None` matches at any price.
    fn execute(&mut self, side: Side, id: u64, remaining: &mut u64, limit_price: Option<u64>) {
        while *remaining > 0 {
            let best_opposite = match side {
                Side::Buy => self.best_ask(),
                Side::Sell => self.best_bid(),
            };
            let best_px = match best_opposite {
                Some(px) => px,
                None => break,
            };

            if let Some(bound) = limit_price {
                if !crosses(side, bound, best_px) {
                    break;
                }
            }

            let mut book_order = match self.pop_best(side.opposite()) {
                Some(order) => order,
                None => break,
            };

            let fill = book_order.remaining.min(*remaining);
            *remaining -= fill;
            book_order.fill(fill);

            trace!(
                incoming_id = id,
                book_id = book_order.id,
                price = book_order.price,
                size = fill,
                "trade"
            );
            self.trades.push(Trade::new(
                clock::now_micros(),
                side,
                book_order.price,
                fill,
                id,
                book_order.id,
            ));

            // Partially filled passive orders return to the book; their
            // priority keys (price, ts, original size) are unchanged.
            if book_order.remaining > 0 {
                self.insert_limit(book_order);
            }
        }
    }

    /// Rest a limit order on its own side.
    fn insert_limit(&mut self, order: LimitOrder) -> usize {
        debug_assert!(order.remaining > 0, "resting orders must have quantity");

        let (id, side, price) = (order.id, order.side, order.price);
        let key = self.orders.insert(OrderNode::new(order));
        self.order_index.insert(id, key);

        match side {
            Side::Buy => {
                self.bids
                    .entry(Reverse(price))
                    .or_insert_with(|| PriceLevel::new(price))
                    .insert(key, &mut self.orders);
                self.bid_count += 1;
            }
            Side::Sell => {
                self.asks
                    .entry(price)
                    .or_insert_with(|| PriceLevel::new(price))
                    .insert(key, &mut self.orders);
                self.ask_count += 1;
            }
        }

        key
    }

    /// Detach one order from its price level, pruning the level when it
    /// empties. The node stays in the arena; callers decide what happens to
    /// it next.
    fn unlink_from_level(&mut self, side: Side, price: u64, key: usize) {
        match side {
            Side::Buy => {
                let level = self
                    .bids
                    .get_mut(&Reverse(price))
                    .expect("resting order has a price level");
                level.remove(key, &mut self.orders);
                if level.is_empty() {
                    self.bids.remove(&Reverse(price));
                }
                self.bid_count -= 1;
            }
            Side::Sell => {
                let level = self
                    .asks
                    .get_mut(&price)
                    .expect("resting order has a price level");
                level.remove(key, &mut self.orders);
                if level.is_empty() {
                    self.asks.remove(&price);
                }
                self.ask_count -= 1;
            }
        }
    }

    /// Remove and return the priority minimum of one side.
    fn pop_best(&mut self, side: Side) -> Option<LimitOrder> {
        let (price, key) = match side {
            Side::Buy => {
                let (bid_key, level) = self.bids.first_key_value()?;
                (bid_key.0, level.peek_head().expect("non-empty level has a head"))
            }
            Side::Sell => {
                let (&price, level) = self.asks.first_key_value()?;
                (price, level.peek_head().expect("non-empty level has a head"))
            }
        };

        self.unlink_from_level(side, price, key);
        let node = self.orders.remove(key);
        self.order_index.remove(&node.order.id);
        Some(node.order)
    }

    /// Cancel a resting order by id.
    ///
    /// The id index resolves the order directly, so no side is scanned.
    ///
    /// # Returns
    ///
    /// The removed order, or `None` if no resting order has this id.
    /// Cancelling an unknown id leaves the book untouched; a cancel after a
    /// fill is indistinguishable from one that never rested.
    pub fn cancel(&mut self, order_id: u64) -> Option<LimitOrder> {
        let key = self.order_index.remove(&order_id)?;
        let node = self.orders.get(key).expect("indexed order is in the arena");
        let (side, price) = (node.order.side, node.order.price);

        self.unlink_from_level(side, price, key);
        Some(self.orders.remove(key).order)
    }

    // ========================================================================
    // Market data accessors
    // ========================================================================

    /// Best bid price (highest resting buy), or `None` if no bids exist.
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.first_key_value().map(|(key, _)| key.0)
    }

    /// Best ask price (lowest resting sell), or `None` if no asks exist.
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.first_key_value().map(|(&price, _)| price)
    }

    /// The `(best_bid, best_ask)` pair drawn from this book state.
    ///
    /// Either element may be `None`. When both are present the bid is
    /// strictly below the ask.
    pub fn spread(&self) -> (Option<u64>, Option<u64>) {
        (self.best_bid(), self.best_ask())
    }

    /// Executed trades in append order.
    #[inline]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Look up a resting order by id.
    #[inline]
    pub fn get(&self, order_id: u64) -> Option<&LimitOrder> {
        self.order_index
            .get(&order_id)
            .and_then(|&key| self.orders.get(key))
            .map(|node| &node.order)
    }

    /// Check if an order is resting in the book.
    #[inline]
    pub fn contains(&self, order_id: u64) -> bool {
        self.order_index.contains_key(&order_id)
    }

    // ========================================================================
    // Size accessors
    // ========================================================================

    /// Total number of resting orders across both sides.
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the book holds no resting orders.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of resting orders on one side.
    #[inline]
    pub fn order_count(&self, side: Side) -> usize {
        match side {
            Side::Buy => self.bid_count,
            Side::Sell => self.ask_count,
        }
    }

    /// Number of populated price levels on one side.
    #[inline]
    pub fn level_count(&self, side: Side) -> usize {
        match side {
            Side::Buy => self.bids.len(),
            Side::Sell => self.asks.len(),
        }
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Human-readable ladder of both sides, best levels first.
    pub fn snapshot(&self) -> String {
        self.to_string()
    }

    /// The book must not be crossed between submits; a crossed book here is
    /// a matching bug.
    fn debug_check_uncrossed(&self) {
        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            debug_assert!(
                bid < ask,
                "book is crossed: bid {} >= ask {}",
                bid,
                ask
            );
        }
    }
}

impl fmt::Display for Orderbook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----- Orderbook -----")?;

        writeln!(f, "Asks:")?;
        for (price, level) in self.asks.iter() {
            writeln!(
                f,
                "  {:>14} | {:>10} units | {} orders",
                format_price_compact(*price),
                level.total_quantity,
                level.order_count
            )?;
        }

        writeln!(f, "Bids:")?;
        for (key, level) in self.bids.iter() {
            writeln!(
                f,
                "  {:>14} | {:>10} units | {} orders",
                format_price_compact(key.0),
                level.total_quantity,
                level.order_count
            )?;
        }

        write!(f, "---------------------")
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
