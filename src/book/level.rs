//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` represents all orders resting at a single price point.
//! Orders are maintained in a doubly-linked queue held in priority order:
//! earlier timestamp first, then smaller original size. Matching consumes
//! orders from the head; any order can be unlinked in O(1) using its slab
//! key.
//!
//! ## Queue Structure
//!
//! ```text
//! head (best priority) <-> order2 <-> order3 <-> tail (worst priority)
//! ```
//!
//! Insertion walks from the tail toward the head. Timestamps are monotonic,
//! so a new order almost always lands directly at the tail; the walk only
//! continues when timestamps collide and the size key decides.

use slab::Slab;

use crate::book::OrderNode;
use crate::types::LimitOrder;

/// A price level containing orders at a single price.
///
/// The actual order data lives in the slab; this struct only holds the
/// queue metadata.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level (fixed-point, scaled by 10^8)
    pub price: u64,

    /// Total remaining quantity at this level
    /// Updated when orders are added/removed/filled
    pub total_quantity: u64,

    /// Head of the order queue (best priority, slab key)
    /// This is the first order to be matched
    pub head: Option<usize>,

    /// Tail of the order queue (worst priority, slab key)
    pub tail: Option<usize>,

    /// Number of orders at this price level
    pub order_count: usize,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    /// Check if the price level is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Insert an order at its priority position.
    ///
    /// Walks from the tail toward the head until it finds a resting order
    /// the new one does not outrank, and links in after it. Orders that tie
    /// on every key stay in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the slab.
    pub fn insert(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let incoming: LimitOrder = slab.get(key).expect("Invalid slab key").order.clone();
        let quantity = incoming.remaining;
        debug_assert_eq!(incoming.price, self.price, "order belongs to another level");

        // Find the insertion point: the nearest node from the tail that the
        // incoming order does not outrank.
        let mut after = self.tail;
        while let Some(cur) = after {
            let cur_node = slab.get(cur).expect("Invalid slab key");
            if !incoming.ranks_before(&cur_node.order) {
                break;
            }
            after = cur_node.prev;
        }

        match after {
            Some(after_key) => {
                let next = slab.get(after_key).expect("Invalid slab key").next;

                let node = slab.get_mut(key).expect("Invalid slab key");
                node.prev = Some(after_key);
                node.next = next;

                slab.get_mut(after_key).expect("Invalid slab key").next = Some(key);
                match next {
                    Some(next_key) => {
                        slab.get_mut(next_key).expect("Invalid next key").prev = Some(key);
                    }
                    None => self.tail = Some(key),
                }
            }
            None => {
                // Outranks everything: new head
                let old_head = self.head;

                let node = slab.get_mut(key).expect("Invalid slab key");
                node.prev = None;
                node.next = old_head;

                match old_head {
                    Some(head_key) => {
                        slab.get_mut(head_key).expect("Invalid head key").prev = Some(key);
                    }
                    None => self.tail = Some(key),
                }
                self.head = Some(key);
            }
        }

        self.order_count += 1;
        self.total_quantity = self.total_quantity.saturating_add(quantity);
    }

    /// Remove an order from the queue by slab key
    ///
    /// # Returns
    ///
    /// The remaining quantity of the removed order
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> u64 {
        let node = slab.get(key).expect("Invalid slab key");
        let quantity = node.remaining();
        let prev_key = node.prev;
        let next_key = node.next;

        // Update the previous node's next pointer
        if let Some(prev) = prev_key {
            let prev_node = slab.get_mut(prev).expect("Invalid prev key");
            prev_node.next = next_key;
        } else {
            // This was the head
            self.head = next_key;
        }

        // Update the next node's prev pointer
        if let Some(next) = next_key {
            let next_node = slab.get_mut(next).expect("Invalid next key");
            next_node.prev = prev_key;
        } else {
            // This was the tail
            self.tail = prev_key;
        }

        // Clear the removed node's pointers
        let node = slab.get_mut(key).expect("Invalid slab key");
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_quantity = self.total_quantity.saturating_sub(quantity);

        quantity
    }

    /// Get the head order's slab key (best priority)
    ///
    /// This is the first order to be matched at this price level.
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Update the total quantity after a partial fill
    pub fn reduce_quantity(&mut self, filled_quantity: u64) {
        self.total_quantity = self.total_quantity.saturating_sub(filled_quantity);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
