//! Synthetic flow generator — a Monte Carlo driver used to validate the
//! matching core under concurrent load. Grounded on the teacher crate's
//! `stress_multi_thread_benchmark` (insert/cancel threads racing against a
//! shared engine); promoted here from a benchmark-only helper into a small
//! reusable module plus the `sim-runner` binary.
//!
//! Out of scope, per the top-level spec: this module is an external
//! collaborator of the matching core, not part of it. It only ever calls
//! the core's public operations.

use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::engine::core::MatchingCore;
use crate::engine::types::{OrderType, Side};

/// Parameters for one simulation run.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    pub duration: Duration,
    pub insert_threads: usize,
    pub cancel_threads: usize,
    pub base_price: f64,
    pub price_spread: f64,
    pub order_qty: f64,
    /// Fraction (0.0–1.0) of placements that are MARKET rather than LIMIT.
    pub market_fraction: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(1),
            insert_threads: 2,
            cancel_threads: 1,
            base_price: 100.0,
            price_spread: 5.0,
            order_qty: 10.0,
            market_fraction: 0.2,
        }
    }
}

/// Counters observed after a run, for reporting or assertions.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimReport {
    pub placed: u64,
    pub cancel_attempts: u64,
}

/// Drives synthetic insert/cancel flow against `core` for `config.duration`,
/// then returns counters. The core's own mutex/condvar protocol is the only
/// synchronization in play — this harness just hammers the public API from
/// multiple threads, the way a real multi-client exchange would be driven.
pub fn run(core: Arc<MatchingCore>, config: SimConfig) -> SimReport {
    let placed = Arc::new(AtomicU64::new(0));
    let cancel_attempts = Arc::new(AtomicU64::new(0));
    let running = Arc::new(std::sync::atomic::AtomicBool::new(true));

    let mut handles = Vec::new();

    for _ in 0..config.insert_threads {
        let core = Arc::clone(&core);
        let placed = Arc::clone(&placed);
        let running = Arc::clone(&running);
        handles.push(thread::spawn(move || {
            let mut rng = rand::rng();
            while running.load(Ordering::Relaxed) {
                let side = if rng.random_bool(0.5) { Side::Bid } else { Side::Ask };
                let order_type = if rng.random_bool(config.market_fraction) {
                    OrderType::Market
                } else {
                    OrderType::Limit
                };
                let offset = rng.random_range(-config.price_spread..config.price_spread);
                let price = (config.base_price + offset).max(0.01);
                core.place_order(side, order_type, config.order_qty, price);
                placed.fetch_add(1, Ordering::Relaxed);
            }
        }));
    }

    for _ in 0..config.cancel_threads {
        let core = Arc::clone(&core);
        let cancel_attempts = Arc::clone(&cancel_attempts);
        let running = Arc::clone(&running);
        let placed = Arc::clone(&placed);
        handles.push(thread::spawn(move || {
            let mut rng = rand::rng();
            while running.load(Ordering::Relaxed) {
                let upper = placed.load(Ordering::Relaxed).max(1);
                let guess = rng.random_range(1..=upper);
                core.cancel_order(guess);
                cancel_attempts.fetch_add(1, Ordering::Relaxed);
            }
        }));
    }

    thread::sleep(config.duration);
    running.store(false, Ordering::Relaxed);
    for h in handles {
        let _ = h.join();
    }

    SimReport {
        placed: placed.load(Ordering::Relaxed),
        cancel_attempts: cancel_attempts.load(Ordering::Relaxed),
    }
}
