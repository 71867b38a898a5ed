//! Replays the deterministic synthetic workload through the feed controller
//! for each selected backing-store strategy and prints top-of-book plus
//! latency statistics.
//!
//! ```bash
//! cargo run -p runner                    # all five strategies
//! cargo run -p runner -- flat-map tree-map
//! ```

use std::time::Duration;

use feed::{FeedConfig, FeedController, FeedEvent, LevelChange, SnapshotEvent, Transport, UpdateEvent};
use orderbook::{FlatMap, HashedTree, LinearScan, Side, SortedArray, Strategy, TreeMap};
use tracing::info;
use tracing_subscriber::EnvFilter;
use workload::{Workload, WorkloadConfig};

const INSTRUMENT: &str = "SYNTH-USD";

const STRATEGY_NAMES: &[&str] = &[
    LinearScan::NAME,
    SortedArray::NAME,
    TreeMap::NAME,
    FlatMap::NAME,
    HashedTree::NAME,
];

/// Stand-in for the external transport: the workload is the feed, so the
/// subscription handshake has nothing to do beyond being observable.
#[derive(Default)]
struct ReplayTransport {
    sessions_opened: usize,
}

impl Transport for ReplayTransport {
    type Session = ();

    fn open(&mut self, instruments: &[String]) -> Self::Session {
        self.sessions_opened += 1;
        info!(instruments = ?instruments, session = self.sessions_opened, "session opened");
    }
}

fn snapshot_event(workload: &Workload) -> FeedEvent {
    let mut bids = Vec::new();
    let mut asks = Vec::new();
    for level in workload.snapshot() {
        match level.side {
            Side::Bid => bids.push((level.price, level.quantity)),
            Side::Ask => asks.push((level.price, level.quantity)),
        }
    }
    FeedEvent::Snapshot(SnapshotEvent {
        instrument: INSTRUMENT.to_string(),
        bids,
        asks,
    })
}

fn run_strategy<S: Strategy>(config: WorkloadConfig) {
    info!(
        strategy = S::NAME,
        levels = config.levels,
        iterations = config.iterations,
        "replaying synthetic workload"
    );

    let mut workload = Workload::new(config);
    let mut controller = FeedController::<S, _>::new(
        FeedConfig {
            instruments: vec![INSTRUMENT.to_string()],
            report_depth: 5,
            report_interval: Duration::from_secs(5),
        },
        ReplayTransport::default(),
    );

    controller.subscribe();
    controller.on_event(&snapshot_event(&workload));

    for update in workload.updates() {
        controller.on_event(&FeedEvent::Update(UpdateEvent {
            instrument: INSTRUMENT.to_string(),
            changes: vec![LevelChange {
                side: update.side,
                price: update.price,
                quantity: update.quantity,
            }],
        }));

        if let Some(report) = controller.poll_report() {
            println!("{report}");
        }
    }

    println!("=== {} ===", S::NAME);
    println!("{}", controller.report());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut selected: Vec<String> = std::env::args().skip(1).collect();
    if selected.is_empty() {
        selected = STRATEGY_NAMES.iter().map(|s| s.to_string()).collect();
    }

    let config = WorkloadConfig::default();

    for name in &selected {
        match name.as_str() {
            n if n == LinearScan::NAME => run_strategy::<LinearScan>(config),
            n if n == SortedArray::NAME => run_strategy::<SortedArray>(config),
            n if n == TreeMap::NAME => run_strategy::<TreeMap>(config),
            n if n == FlatMap::NAME => run_strategy::<FlatMap>(config),
            n if n == HashedTree::NAME => run_strategy::<HashedTree>(config),
            other => {
                eprintln!("unknown strategy '{other}', expected one of: {STRATEGY_NAMES:?}");
                std::process::exit(1);
            }
        }
    }
}
