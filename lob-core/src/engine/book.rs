use ordered_float::OrderedFloat;
use std::collections::{HashMap, VecDeque};

use super::ladder::PriceLadder;
use super::registry::OrderRegistry;
use super::types::{OrderId, Price, Side};

/// The FIFO queue of resting order ids sharing one price on one side.
/// Invariant: never empty while its price is registered in the ladder.
type Level = VecDeque<OrderId>;

/// One side (bid or ask) of a single instrument's book: a `PriceLadder` over
/// distinct live prices plus a price→level map. Ladder membership and a
/// non-empty level at that price are kept in exact agreement.
#[derive(Debug)]
pub struct OrderBookSide {
    side: Side,
    ladder: PriceLadder,
    levels: HashMap<OrderedFloat<Price>, Level>,
}

impl OrderBookSide {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            ladder: PriceLadder::new(side),
            levels: HashMap::new(),
        }
    }

    /// Appends `id` to the tail of the level at `price`, creating the level
    /// (and inserting `price` into the ladder) if this is its first order.
    pub fn insert(&mut self, price: Price, id: OrderId) {
        let key = OrderedFloat(price);
        match self.levels.get_mut(&key) {
            Some(level) => level.push_back(id),
            None => {
                self.ladder.insert(price);
                let mut level = VecDeque::new();
                level.push_back(id);
                self.levels.insert(key, level);
            }
        }
    }

    /// Returns the best level's (price, head-order-id), or `None` if the
    /// side is empty.
    pub fn head(&self) -> Option<(Price, OrderId)> {
        let price = self.ladder.peek_best()?;
        let level = self.levels.get(&OrderedFloat(price))?;
        level.front().map(|&id| (price, id))
    }

    /// Drops the head of the best level. If the level empties, removes it
    /// from both the ladder and the level map. Panics if the side is empty —
    /// callers must check `head()` first.
    pub fn advance_head(&mut self) {
        let price = self
            .ladder
            .peek_best()
            .expect("advance_head called on an empty side");
        let key = OrderedFloat(price);
        let level = self
            .levels
            .get_mut(&key)
            .expect("ladder/level map disagreement");
        level.pop_front();
        if level.is_empty() {
            self.levels.remove(&key);
            self.ladder.pop_best();
        }
    }

    /// Removes `id`, known to rest at `price`, from its level. If the level
    /// empties as a result, removes it from the ladder too.
    pub fn remove_by_id(&mut self, price: Price, id: OrderId) {
        let key = OrderedFloat(price);
        if let Some(level) = self.levels.get_mut(&key) {
            level.retain(|&existing| existing != id);
            if level.is_empty() {
                self.levels.remove(&key);
                self.ladder.remove(price);
            }
        }
    }

    pub fn best_price(&self) -> Option<Price> {
        self.ladder.peek_best()
    }

    pub fn is_empty(&self) -> bool {
        self.ladder.is_empty()
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Snapshot of every resting order on this side, by walking levels in
    /// ladder order and resolving ids against the registry. Intended for
    /// queries (`get_orders_by_status`), never the hot match-loop path.
    pub fn resting_order_ids(&self, registry: &OrderRegistry) -> Vec<OrderId> {
        let mut ids: Vec<OrderId> = self.levels.values().flatten().copied().collect();
        ids.sort_by(|&a, &b| {
            let pa = registry.get(a).map(|o| o.arrival).unwrap_or(0);
            let pb = registry.get(b).map(|o| o.arrival).unwrap_or(0);
            pa.cmp(&pb)
        });
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_creates_level_and_appends_tail() {
        let mut side = OrderBookSide::new(Side::Bid);
        side.insert(100.0, 1);
        side.insert(100.0, 2);
        assert_eq!(side.head(), Some((100.0, 1)));
    }

    #[test]
    fn advance_head_drops_level_when_empty() {
        let mut side = OrderBookSide::new(Side::Ask);
        side.insert(50.0, 1);
        side.advance_head();
        assert!(side.is_empty());
        assert_eq!(side.head(), None);
    }

    #[test]
    fn remove_by_id_keeps_level_with_remaining_orders() {
        let mut side = OrderBookSide::new(Side::Bid);
        side.insert(100.0, 1);
        side.insert(100.0, 2);
        side.remove_by_id(100.0, 1);
        assert_eq!(side.head(), Some((100.0, 2)));
    }

    #[test]
    fn best_price_tracks_ladder() {
        let mut side = OrderBookSide::new(Side::Bid);
        side.insert(100.0, 1);
        side.insert(105.0, 2);
        assert_eq!(side.best_price(), Some(105.0));
    }
}
