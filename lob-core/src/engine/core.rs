use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use super::book::OrderBookSide;
use super::error::{CancelRejectReason, RejectReason};
use super::registry::OrderRegistry;
use super::syncer::EventSink;
use super::types::{Event, EventKind, Order, OrderId, OrderStatus, OrderType, Price, Quantity, Side};
use super::worker::Handoff;

/// Construction-time configuration for one `MatchingCore`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    /// Seeds `get_price`'s fallback for a book that has never crossed and
    /// has no resting liquidity on at least one side.
    pub ipo_price: Option<Price>,
}

/// All state mutated by `place_order`/`cancel_order`/`edit_order` and by the
/// worker's match loop. Lives behind a `Handoff` so both sides of the
/// protocol share one mutex.
struct CoreState {
    bid: OrderBookSide,
    ask: OrderBookSide,
    registry: OrderRegistry,
    next_id: OrderId,
    /// The most recently admitted order's id — the "aggressor of record"
    /// the match loop drains on the next wake.
    aggressor: OrderId,
    clock: Instant,
    ipo_price: Option<Price>,
}

impl CoreState {
    fn new(config: EngineConfig) -> Self {
        Self {
            bid: OrderBookSide::new(Side::Bid),
            ask: OrderBookSide::new(Side::Ask),
            registry: OrderRegistry::new(),
            next_id: 1,
            aggressor: 0,
            clock: Instant::now(),
            ipo_price: config.ipo_price,
        }
    }

    fn now(&self) -> u64 {
        self.clock.elapsed().as_micros() as u64
    }

    fn side(&self, side: Side) -> &OrderBookSide {
        match side {
            Side::Bid => &self.bid,
            Side::Ask => &self.ask,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut OrderBookSide {
        match side {
            Side::Bid => &mut self.bid,
            Side::Ask => &mut self.ask,
        }
    }

    fn place_order(
        &mut self,
        side: Side,
        order_type: OrderType,
        qty: Quantity,
        price: Price,
        sink: &dyn EventSink,
    ) -> OrderId {
        if let Err(reason) = self.validate_placement(side, order_type, qty) {
            sink.on_event(&Event {
                kind: EventKind::Reject,
                order_id: 0,
                side,
                order_type,
                qty,
                price,
                timestamp: self.now(),
            });
            tracing::debug!(?reason, "place_order rejected");
            return 0;
        }

        let working_price = self.working_price(side, order_type, price);

        let id = self.next_id;
        self.next_id += 1;

        let order = Order {
            id,
            side,
            order_type,
            original_qty: qty,
            remaining_qty: qty,
            working_price,
            status: OrderStatus::Open,
            arrival: self.now(),
        };
        self.registry.insert(order);
        self.side_mut(side).insert(working_price, id);

        sink.on_event(&Event {
            kind: EventKind::Open,
            order_id: id,
            side,
            order_type,
            qty,
            price: working_price,
            timestamp: self.now(),
        });

        self.aggressor = id;
        id
    }

    fn validate_placement(
        &self,
        side: Side,
        order_type: OrderType,
        qty: Quantity,
    ) -> Result<(), RejectReason> {
        if qty <= 0.0 {
            return Err(RejectReason::NonPositiveQuantity);
        }
        if order_type == OrderType::Market && self.side(side.opposite()).is_empty() {
            return Err(RejectReason::NoOppositeLiquidity);
        }
        Ok(())
    }

    /// Derives the price at which an admitted order will rest, per §4.4 step 2.
    fn working_price(&self, side: Side, order_type: OrderType, price: Price) -> Price {
        match (side, order_type) {
            (Side::Bid, OrderType::Limit) => match self.ask.best_price() {
                Some(best_ask) if price > best_ask => best_ask,
                _ => price,
            },
            (Side::Ask, OrderType::Limit) => match self.bid.best_price() {
                Some(best_bid) if price < best_bid => best_bid,
                _ => price,
            },
            (Side::Bid, OrderType::Market) => self
                .ask
                .best_price()
                .expect("market order validated against an empty opposite side"),
            (Side::Ask, OrderType::Market) => self
                .bid
                .best_price()
                .expect("market order validated against an empty opposite side"),
        }
    }

    fn cancel_order(&mut self, id: OrderId, sink: &dyn EventSink) -> bool {
        let snapshot = match self.registry.get(id) {
            Some(order) => order.clone(),
            None => {
                tracing::debug!(order_id = id, reason = ?CancelRejectReason::UnknownOrder, "cancel rejected");
                return false;
            }
        };
        if !snapshot.is_open() {
            tracing::debug!(order_id = id, reason = ?CancelRejectReason::NotOpen, "cancel rejected");
            return false;
        }
        if snapshot.order_type == OrderType::Market {
            tracing::debug!(order_id = id, reason = ?CancelRejectReason::MarketOrder, "cancel rejected");
            return false;
        }

        self.side_mut(snapshot.side)
            .remove_by_id(snapshot.working_price, id);
        let order = self.registry.get_mut(id).expect("just looked up above");
        order.status = OrderStatus::Cancelled;

        sink.on_event(&Event {
            kind: EventKind::Cancel,
            order_id: id,
            side: snapshot.side,
            order_type: snapshot.order_type,
            qty: snapshot.remaining_qty,
            price: snapshot.working_price,
            timestamp: self.now(),
        });
        true
    }

    fn edit_order(
        &mut self,
        id: OrderId,
        side: Side,
        qty: Quantity,
        price: Price,
        sink: &dyn EventSink,
    ) -> OrderId {
        if !self.cancel_order(id, sink) {
            return 0;
        }
        self.place_order(side, OrderType::Limit, qty, price, sink)
    }

    /// The match loop proper: §4.7. Runs to completion (fully drains the
    /// current aggressor) before returning control to the worker, then
    /// closes out a MARKET aggressor that could not be fully filled — MARKET
    /// orders never rest, so a remainder left over once the opposite side
    /// empties is dropped rather than left OPEN on the book.
    fn run_match_loop(&mut self, sink: &dyn EventSink) {
        loop {
            let aggressor = match self.registry.get(self.aggressor) {
                Some(order) => (order.status, order.remaining_qty),
                None => break,
            };
            if self.bid.is_empty() || self.ask.is_empty() {
                break;
            }
            if aggressor.0 != OrderStatus::Open || aggressor.1 <= 0.0 {
                break;
            }

            let Some((ask_price, ask_id)) = self.ask.head() else {
                break;
            };
            let Some((bid_price, bid_id)) = self.bid.head() else {
                break;
            };

            if bid_price < ask_price {
                break;
            }

            let ask_qty = self.registry.get(ask_id).expect("ladder/registry agree").remaining_qty;
            let bid_qty = self.registry.get(bid_id).expect("ladder/registry agree").remaining_qty;
            let fill_qty = ask_qty.min(bid_qty);
            let now = self.now();

            let ask_done = {
                let order = self.registry.get_mut(ask_id).expect("ladder/registry agree");
                order.remaining_qty -= fill_qty;
                let done = order.remaining_qty <= 0.0;
                if done {
                    order.status = OrderStatus::Filled;
                }
                sink.on_event(&Event {
                    kind: if done { EventKind::Fill } else { EventKind::PartialFill },
                    order_id: ask_id,
                    side: Side::Ask,
                    order_type: order.order_type,
                    qty: fill_qty,
                    price: order.working_price,
                    timestamp: now,
                });
                done
            };
            let bid_done = {
                let order = self.registry.get_mut(bid_id).expect("ladder/registry agree");
                order.remaining_qty -= fill_qty;
                let done = order.remaining_qty <= 0.0;
                if done {
                    order.status = OrderStatus::Filled;
                }
                sink.on_event(&Event {
                    kind: if done { EventKind::Fill } else { EventKind::PartialFill },
                    order_id: bid_id,
                    side: Side::Bid,
                    order_type: order.order_type,
                    qty: fill_qty,
                    price: order.working_price,
                    timestamp: now,
                });
                done
            };

            if ask_done {
                self.ask.advance_head();
            }
            if bid_done {
                self.bid.advance_head();
            }
        }

        self.finalize_unrested_market(sink);
    }

    /// Drops a MARKET aggressor's unfilled remainder, if any, once the loop
    /// above has exhausted every cross it can make. A LIMIT aggressor left
    /// OPEN here is left alone — resting is exactly what it's supposed to do.
    fn finalize_unrested_market(&mut self, sink: &dyn EventSink) {
        let Some(order) = self.registry.get(self.aggressor) else {
            return;
        };
        if order.order_type != OrderType::Market
            || order.status != OrderStatus::Open
            || order.remaining_qty <= 0.0
        {
            return;
        }
        let id = order.id;
        let side = order.side;
        let price = order.working_price;
        let qty = order.remaining_qty;

        self.side_mut(side).remove_by_id(price, id);
        let order = self.registry.get_mut(id).expect("looked up above");
        order.status = OrderStatus::Cancelled;

        sink.on_event(&Event {
            kind: EventKind::Cancel,
            order_id: id,
            side,
            order_type: OrderType::Market,
            qty,
            price,
            timestamp: self.now(),
        });
    }

    fn best_bid(&self) -> Price {
        self.bid.best_price().unwrap_or(-1.0)
    }

    fn best_ask(&self) -> Price {
        self.ask.best_price().unwrap_or(-1.0)
    }

    fn mid_or_seeded(&self) -> Price {
        match (self.bid.best_price(), self.ask.best_price()) {
            (Some(b), Some(a)) => (b + a) / 2.0,
            _ => self.ipo_price.unwrap_or(-1.0),
        }
    }

    fn orders_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.registry.by_status(status)
    }
}

/// The single-instrument matching engine: owns both sides, the registry, the
/// id allocator, and the event emitter, and runs the concurrency protocol
/// described in §5 — one dedicated worker thread draining the match loop
/// under the shared mutex while client calls enqueue at most one aggressor
/// at a time.
pub struct MatchingCore {
    handoff: Arc<Handoff<CoreState>>,
    sink: Arc<dyn EventSink>,
    worker: Option<JoinHandle<()>>,
}

impl MatchingCore {
    pub fn new(config: EngineConfig, sink: Arc<dyn EventSink>) -> Self {
        let handoff = Arc::new(Handoff::new(CoreState::new(config)));
        let worker_handoff = Arc::clone(&handoff);
        let worker_sink = Arc::clone(&sink);
        let worker = std::thread::spawn(move || {
            worker_handoff.drain_loop(|state| state.run_match_loop(worker_sink.as_ref()));
        });
        Self {
            handoff,
            sink,
            worker: Some(worker),
        }
    }

    pub fn place_order(&self, side: Side, order_type: OrderType, qty: Quantity, price: Price) -> OrderId {
        let sink = Arc::clone(&self.sink);
        self.handoff
            .submit(move |state| state.place_order(side, order_type, qty, price, sink.as_ref()))
    }

    pub fn cancel_order(&self, id: OrderId) -> bool {
        let sink = Arc::clone(&self.sink);
        self.handoff.submit(move |state| state.cancel_order(id, sink.as_ref()))
    }

    pub fn edit_order(&self, id: OrderId, side: Side, qty: Quantity, price: Price) -> OrderId {
        let sink = Arc::clone(&self.sink);
        self.handoff
            .submit(move |state| state.edit_order(id, side, qty, price, sink.as_ref()))
    }

    pub fn get_order(&self, id: OrderId) -> Option<Order> {
        self.handoff.read(|state| state.registry.get(id).cloned())
    }

    pub fn get_best_bid(&self) -> Price {
        self.handoff.read(|state| state.best_bid())
    }

    pub fn get_best_ask(&self) -> Price {
        self.handoff.read(|state| state.best_ask())
    }

    pub fn get_price(&self) -> Price {
        self.handoff.read(|state| state.mid_or_seeded())
    }

    pub fn get_orders_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.handoff.read(|state| state.orders_by_status(status))
    }
}

impl Drop for MatchingCore {
    fn drop(&mut self) {
        self.handoff.shutdown();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
