mod common;

use crate::common::*;
use lob_core::prelude::*;

#[test]
fn initial_state_is_open() {
    let core = fresh_core();
    let id = core.place_order(Side::Bid, OrderType::Limit, 10.0, 100.0);

    let order = core.get_order(id).unwrap();
    assert_eq!(order.status, OrderStatus::Open);
}

#[test]
fn full_match_transitions_both_sides_to_filled() {
    let core = fresh_core();
    let sell = core.place_order(Side::Ask, OrderType::Limit, 10.0, 100.0);
    let buy = core.place_order(Side::Bid, OrderType::Limit, 10.0, 100.0);

    assert_eq!(core.get_order(sell).unwrap().status, OrderStatus::Filled);
    assert_eq!(core.get_order(buy).unwrap().status, OrderStatus::Filled);
    assert!(open_orders(&core).is_empty());
}

#[test]
fn partial_match_leaves_remainder_open() {
    let core = fresh_core();
    let sell = core.place_order(Side::Ask, OrderType::Limit, 10.0, 100.0);
    let buy = core.place_order(Side::Bid, OrderType::Limit, 5.0, 100.0);

    let sell = core.get_order(sell).unwrap();
    assert_eq!(sell.status, OrderStatus::Open);
    assert_eq!(sell.remaining_qty, 5.0);
    assert_eq!(core.get_order(buy).unwrap().status, OrderStatus::Filled);
}

#[test]
fn cancel_transitions_to_cancelled_and_removes_from_book() {
    let core = fresh_core();
    let id = core.place_order(Side::Bid, OrderType::Limit, 10.0, 100.0);
    assert!(core.cancel_order(id));

    assert_eq!(core.get_order(id).unwrap().status, OrderStatus::Cancelled);
    assert_eq!(core.get_best_bid(), -1.0);
}

#[test]
fn cancelling_a_filled_order_is_rejected() {
    let core = fresh_core();
    let sell = core.place_order(Side::Ask, OrderType::Limit, 10.0, 100.0);
    core.place_order(Side::Bid, OrderType::Limit, 10.0, 100.0);

    assert!(!core.cancel_order(sell));
}
