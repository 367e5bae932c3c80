use super::types::Event;

/// Consumer-facing hook for the matching core's event stream.
///
/// Delivered in the order the worker produces them, under the core's mutex —
/// implementations must not block and must not call back into the engine.
/// This mirrors the no-back-channel contract of the teacher crate's
/// `OrderBookSyncer` trait, narrowed to the event shapes this core emits.
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: &Event);
}

/// A no-op sink, for tests and callers that only care about book state.
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn on_event(&self, _event: &Event) {}
}

/// The default sink: logs each event at `debug` level via `tracing`. Never
/// blocks — `tracing` subscribers are responsible for their own buffering.
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn on_event(&self, event: &Event) {
        tracing::debug!(
            kind = ?event.kind,
            order_id = event.order_id,
            side = ?event.side,
            order_type = ?event.order_type,
            qty = event.qty,
            price = event.price,
            timestamp = event.timestamp,
            "engine event"
        );
    }
}
