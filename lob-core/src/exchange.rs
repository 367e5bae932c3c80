use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::engine::core::{EngineConfig, MatchingCore};
use crate::engine::syncer::{EventSink, TracingEventSink};
use crate::engine::types::{Order, OrderId, OrderStatus, OrderType, Price, Quantity, Side};

/// Maps ticker symbols to independent per-symbol `MatchingCore`s and forwards
/// client operations to the right one. Per-symbol cores never share a lock —
/// an operation on one ticker never blocks on another.
pub struct Exchange {
    cores: Mutex<HashMap<String, Arc<MatchingCore>>>,
    sink: Arc<dyn EventSink>,
}

impl Default for Exchange {
    fn default() -> Self {
        Self::new(Arc::new(TracingEventSink))
    }
}

impl Exchange {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            cores: Mutex::new(HashMap::new()),
            sink,
        }
    }

    /// Registers `ticker` with a fresh `MatchingCore` if it is not already
    /// listed. `ipo_qty` has no effect on the core itself (the core takes no
    /// opening inventory) — it exists for callers that want to record an
    /// initial seed alongside the seed price; the core only ever consumes
    /// `ipo_price`, as `get_price`'s fallback.
    pub fn list(&self, ticker: &str, ipo_price: Price, _ipo_qty: Quantity) {
        let mut cores = self.cores.lock().unwrap();
        cores.entry(ticker.to_string()).or_insert_with(|| {
            Arc::new(MatchingCore::new(
                EngineConfig {
                    ipo_price: Some(ipo_price),
                },
                Arc::clone(&self.sink),
            ))
        });
    }

    fn core(&self, ticker: &str) -> Option<Arc<MatchingCore>> {
        self.cores.lock().unwrap().get(ticker).cloned()
    }

    pub fn place_order(
        &self,
        ticker: &str,
        side: Side,
        order_type: OrderType,
        qty: Quantity,
        price: Price,
    ) -> OrderId {
        match self.core(ticker) {
            Some(core) => core.place_order(side, order_type, qty, price),
            None => 0,
        }
    }

    pub fn cancel_order(&self, ticker: &str, id: OrderId) -> bool {
        match self.core(ticker) {
            Some(core) => core.cancel_order(id),
            None => false,
        }
    }

    pub fn edit_order(&self, ticker: &str, id: OrderId, side: Side, qty: Quantity, price: Price) -> OrderId {
        match self.core(ticker) {
            Some(core) => core.edit_order(id, side, qty, price),
            None => 0,
        }
    }

    pub fn get_order(&self, ticker: &str, id: OrderId) -> Option<Order> {
        self.core(ticker)?.get_order(id)
    }

    pub fn get_best_bid(&self, ticker: &str) -> Price {
        self.core(ticker).map(|c| c.get_best_bid()).unwrap_or(-1.0)
    }

    pub fn get_best_ask(&self, ticker: &str) -> Price {
        self.core(ticker).map(|c| c.get_best_ask()).unwrap_or(-1.0)
    }

    pub fn get_price(&self, ticker: &str) -> Price {
        self.core(ticker).map(|c| c.get_price()).unwrap_or(-1.0)
    }

    pub fn get_orders_by_status(&self, ticker: &str, status: OrderStatus) -> Vec<Order> {
        self.core(ticker)
            .map(|c| c.get_orders_by_status(status))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::syncer::NullEventSink;

    #[test]
    fn unlisted_ticker_rejects_everything() {
        let exchange = Exchange::new(Arc::new(NullEventSink));
        let id = exchange.place_order("AAPL", Side::Bid, OrderType::Limit, 10.0, 100.0);
        assert_eq!(id, 0);
        assert_eq!(exchange.get_best_bid("AAPL"), -1.0);
    }

    #[test]
    fn listing_twice_keeps_the_first_core() {
        let exchange = Exchange::new(Arc::new(NullEventSink));
        exchange.list("AAPL", 100.0, 1_000.0);
        let id = exchange.place_order("AAPL", Side::Bid, OrderType::Limit, 10.0, 99.0);
        assert_ne!(id, 0);

        exchange.list("AAPL", 200.0, 500.0);
        // Re-listing must not reset the book: the order placed above is
        // still live under the original core.
        assert_eq!(exchange.get_best_bid("AAPL"), 99.0);
    }

    #[test]
    fn symbols_are_independent() {
        let exchange = Exchange::new(Arc::new(NullEventSink));
        exchange.list("AAPL", 100.0, 0.0);
        exchange.list("MSFT", 300.0, 0.0);

        exchange.place_order("AAPL", Side::Bid, OrderType::Limit, 10.0, 100.0);
        assert_eq!(exchange.get_best_bid("MSFT"), -1.0);
        assert_eq!(exchange.get_best_bid("AAPL"), 100.0);
    }
}
