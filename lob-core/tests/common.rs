use lob_core::prelude::*;
use std::sync::Arc;

/// Spins up a `MatchingCore` with no seed price and a sink that drops every
/// event, for tests that only care about book state after each call returns.
pub fn fresh_core() -> MatchingCore {
    MatchingCore::new(EngineConfig::default(), Arc::new(NullEventSink))
}

/// Same, but seeded with an IPO price for `get_price` fallback tests.
pub fn seeded_core(ipo_price: Price) -> MatchingCore {
    MatchingCore::new(
        EngineConfig {
            ipo_price: Some(ipo_price),
        },
        Arc::new(NullEventSink),
    )
}

pub fn open_orders(core: &MatchingCore) -> Vec<Order> {
    core.get_orders_by_status(OrderStatus::Open)
}
