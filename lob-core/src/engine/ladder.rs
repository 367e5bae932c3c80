use ordered_float::OrderedFloat;
use std::collections::BinaryHeap;

use super::types::{Price, Side};

/// A best-first structure over distinct prices for one side of the book.
///
/// Backed by a binary heap with a linear-scan `remove` — acceptable given
/// the expected number of distinct price levels on a single instrument.
/// The ordering comparator (min-heap for asks, max-heap for bids) is fixed
/// at construction and never changes. Prices are unique within a ladder so
/// no tie-break beyond price is required.
#[derive(Debug)]
pub struct PriceLadder {
    side: Side,
    heap: BinaryHeap<HeapKey>,
}

/// Wraps a price so that `BinaryHeap`'s max-heap ordering yields the correct
/// "best" price for the ladder's side: reversed for asks (min wins), direct
/// for bids (max wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapKey {
    price: OrderedFloat<Price>,
    side: Side,
}

impl Ord for HeapKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.side {
            Side::Bid => self.price.cmp(&other.price),
            Side::Ask => other.price.cmp(&self.price),
        }
    }
}

impl PartialOrd for HeapKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PriceLadder {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            heap: BinaryHeap::new(),
        }
    }

    /// Adds a price. Caller guarantees `price` is not already present.
    pub fn insert(&mut self, price: Price) {
        self.heap.push(HeapKey {
            price: OrderedFloat(price),
            side: self.side,
        });
    }

    /// Returns the best price without removing it.
    pub fn peek_best(&self) -> Option<Price> {
        self.heap.peek().map(|k| k.price.into_inner())
    }

    /// Removes the best price. Undefined (panics) if empty.
    pub fn pop_best(&mut self) {
        self.heap.pop().expect("pop_best called on empty ladder");
    }

    /// Removes an arbitrary price known to be present.
    pub fn remove(&mut self, price: Price) {
        let target = OrderedFloat(price);
        let mut items: Vec<HeapKey> = std::mem::take(&mut self.heap).into_vec();
        let pos = items
            .iter()
            .position(|k| k.price == target)
            .expect("remove called with a price not present in the ladder");
        items.swap_remove(pos);
        self.heap = BinaryHeap::from(items);
    }

    pub fn size(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bid_ladder_is_max_first() {
        let mut l = PriceLadder::new(Side::Bid);
        l.insert(100.0);
        l.insert(105.0);
        l.insert(99.0);
        assert_eq!(l.peek_best(), Some(105.0));
        l.pop_best();
        assert_eq!(l.peek_best(), Some(100.0));
    }

    #[test]
    fn ask_ladder_is_min_first() {
        let mut l = PriceLadder::new(Side::Ask);
        l.insert(100.0);
        l.insert(95.0);
        l.insert(110.0);
        assert_eq!(l.peek_best(), Some(95.0));
        l.pop_best();
        assert_eq!(l.peek_best(), Some(100.0));
    }

    #[test]
    fn remove_arbitrary_price() {
        let mut l = PriceLadder::new(Side::Bid);
        l.insert(100.0);
        l.insert(105.0);
        l.insert(99.0);
        l.remove(105.0);
        assert_eq!(l.size(), 2);
        assert_eq!(l.peek_best(), Some(100.0));
    }

    #[test]
    fn empty_ladder_peeks_none() {
        let l = PriceLadder::new(Side::Bid);
        assert_eq!(l.peek_best(), None);
        assert!(l.is_empty());
    }
}
