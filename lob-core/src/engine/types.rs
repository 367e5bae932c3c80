/// OrderId is the type used for order ids. Id 0 is reserved for "no order" / rejection.
pub type OrderId = u64;

/// Price is the type used for order prices. Real-valued; raw `f64` equality is used
/// for level keys exactly as submitted, per the matching core's numeric semantics.
pub type Price = f64;

/// Quantity is the type used for order quantities.
pub type Quantity = f64;

/// Side indicates the direction of the order.
#[derive(PartialEq, Eq, Default, Copy, Clone, Debug, Hash)]
pub enum Side {
    /// A resting or incoming buy order.
    #[default]
    Bid,
    /// A resting or incoming sell order.
    Ask,
}

impl Side {
    /// The opposite side: the one this side matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

/// OrderType determines whether the order may rest on the book.
#[derive(PartialEq, Eq, Default, Copy, Clone, Debug)]
pub enum OrderType {
    /// Rests on the book at its working price if not immediately exhausted.
    #[default]
    Limit,
    /// Executes against existing liquidity only; never rests.
    Market,
}

/// OrderStatus is the lifecycle state of an order.
#[derive(PartialEq, Eq, Default, Copy, Clone, Debug)]
pub enum OrderStatus {
    /// Live and resting, or just admitted and not yet drained by the match loop.
    #[default]
    Open,
    /// Fully matched; no remaining quantity.
    Filled,
    /// Removed from the book by its owner before being fully matched.
    Cancelled,
    /// Never admitted to the book.
    Rejected,
}

/// A single order record. Immutable fields are set at admission; `remaining_qty`,
/// `working_price`, and `status` are mutated in place by the matching core.
///
/// The registry is the single owner of this record — book levels only ever
/// hold `OrderId`s, never a second copy of the order (see `engine::registry`).
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub order_type: OrderType,
    pub original_qty: Quantity,
    pub remaining_qty: Quantity,
    /// For LIMIT, the price at which the order rests (after any clamping).
    /// For MARKET, the opposite book's best price at intake time.
    pub working_price: Price,
    pub status: OrderStatus,
    /// Logical arrival time, in microseconds since the engine's epoch. Orders
    /// within one level are queued in arrival order regardless of this field's
    /// exact value; it exists for event reporting and external inspection.
    pub arrival: u64,
}

impl Order {
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }
}

/// EventKind enumerates the externally observable event kinds the matching
/// core may emit. Delivery order is the worker's production order.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum EventKind {
    Open,
    PartialFill,
    Fill,
    Cancel,
    Reject,
}

/// A single emitted event. Consumers (`EventSink` implementors) see exactly
/// this shape; the core never calls back into a sink's own state.
#[derive(Clone, Debug)]
pub struct Event {
    pub kind: EventKind,
    pub order_id: OrderId,
    pub side: Side,
    pub order_type: OrderType,
    pub qty: Quantity,
    pub price: Price,
    pub timestamp: u64,
}
