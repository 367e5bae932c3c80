//! CLI entry point driving `lob_core::sim` against a freshly constructed
//! matching core, for ad-hoc concurrency soak testing.

use std::sync::Arc;
use std::time::Duration;

use lob_core::engine::core::{EngineConfig, MatchingCore};
use lob_core::engine::syncer::NullEventSink;
use lob_core::sim::{self, SimConfig};

fn main() {
    tracing_subscriber::fmt::init();

    let core = Arc::new(MatchingCore::new(
        EngineConfig { ipo_price: Some(100.0) },
        Arc::new(NullEventSink),
    ));

    let config = SimConfig {
        duration: Duration::from_secs(3),
        insert_threads: 4,
        cancel_threads: 2,
        ..Default::default()
    };

    let report = sim::run(Arc::clone(&core), config);
    println!(
        "placed {} orders, {} cancel attempts, best_bid={:?}, best_ask={:?}",
        report.placed,
        report.cancel_attempts,
        core.get_best_bid(),
        core.get_best_ask(),
    );
}
