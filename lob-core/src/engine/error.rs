use thiserror::Error;

/// Why `place_order` rejected an order outright (returned id 0).
///
/// This is an internal diagnostic, not part of the public return type: per
/// the core's error taxonomy, recoverable rejections surface to callers as
/// sentinels (`0`/`false`), never as a `Result` the caller must match on.
/// The reason is used only to pick the optional REJECT event's context and
/// for `tracing` diagnostics.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    #[error("market order has no resting liquidity on the opposite side")]
    NoOppositeLiquidity,
    #[error("order quantity must be positive")]
    NonPositiveQuantity,
}

/// Why `cancel_order` rejected a cancellation (returned false).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CancelRejectReason {
    #[error("unknown order id")]
    UnknownOrder,
    #[error("order is not open")]
    NotOpen,
    #[error("market orders cannot be cancelled")]
    MarketOrder,
}
