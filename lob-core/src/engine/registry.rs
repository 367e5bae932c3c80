use std::collections::HashMap;

use super::types::{Order, OrderId, OrderStatus};

/// The single owner of every order record ever admitted to one engine.
///
/// Append-only with respect to id assignment: entries are never deleted, so
/// an order remains queryable by id long after it leaves the book. Book
/// levels hold only `OrderId`s and look the record up here.
#[derive(Debug, Default)]
pub struct OrderRegistry {
    orders: HashMap<OrderId, Order>,
}

impl OrderRegistry {
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
        }
    }

    pub fn insert(&mut self, order: Order) {
        self.orders.insert(order.id, order);
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    pub fn get_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.orders.get_mut(&id)
    }

    pub fn by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.orders
            .values()
            .filter(|o| o.status == status)
            .cloned()
            .collect()
    }
}
