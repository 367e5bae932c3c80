mod common;

use crate::common::*;
use lob_core::prelude::*;
use rand::Rng;
use std::sync::Arc;
use std::thread;

#[test]
fn massive_non_crossing_insertion() {
    let core = fresh_core();
    for i in 0..20_000u64 {
        let price = 1000.0 - (i % 1000) as f64;
        core.place_order(Side::Bid, OrderType::Limit, 10.0, price);
    }

    assert_eq!(open_orders(&core).len(), 20_000);
}

#[test]
fn massive_random_cancellation_does_not_panic() {
    let core = fresh_core();
    for i in 0..10_000u64 {
        let price = 1000.0 + (i % 500) as f64;
        core.place_order(Side::Ask, OrderType::Limit, 10.0, price);
    }

    let mut rng = rand::rng();
    for _ in 0..5_000 {
        let guess = rng.random_range(1..=10_000u64);
        let _ = core.cancel_order(guess);
    }
}

#[test]
fn massive_aggressive_crossing_does_not_panic() {
    let core = fresh_core();
    for i in 0..3_000u64 {
        let price = 1000.0 + (i % 500) as f64;
        core.place_order(Side::Ask, OrderType::Limit, 10.0, price);
    }
    for _ in 0..3_000u64 {
        core.place_order(Side::Bid, OrderType::Limit, 10.0, 2000.0);
    }

    assert_eq!(core.get_best_ask(), -1.0);
}

#[test]
fn concurrent_clients_never_corrupt_shared_state() {
    let core = Arc::new(fresh_core());
    let mut handles = Vec::new();

    for t in 0..8u64 {
        let core = Arc::clone(&core);
        handles.push(thread::spawn(move || {
            for i in 0..500u64 {
                let side = if (t + i) % 2 == 0 { Side::Bid } else { Side::Ask };
                core.place_order(side, OrderType::Limit, 1.0, 100.0 + (i % 10) as f64);
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    // 4000 orders admitted across 8 threads; every id in [1, 4000] must
    // resolve to a real, distinctly-owned order — the handoff protocol
    // guarantees no id is skipped or assigned twice.
    for id in 1..=4000u64 {
        assert!(core.get_order(id).is_some());
    }
}
