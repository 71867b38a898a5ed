//! Replaying the identical seeded stream through every backing-store
//! strategy must leave bit-identical (price, quantity) sets on both sides.

use orderbook::{
    FlatMap, HashedTree, LinearScan, OrderBook, PriceLevel, SortedArray, Strategy, TreeMap,
};
use workload::{Workload, WorkloadConfig};

/// Final book contents as price-sorted (price, quantity) pairs per side.
///
/// Sorting here makes the comparison order-insensitive, so LinearScan's
/// unordered storage is compared on contents alone.
fn final_contents<S: Strategy>(config: WorkloadConfig) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let mut workload = Workload::new(config);
    let mut book = OrderBook::<S>::new("SYNTH-USD");
    workload.populate(&mut book);
    workload.replay(&mut book);

    let dump = |levels: Vec<PriceLevel>| {
        let mut pairs: Vec<(f64, f64)> = levels.iter().map(|l| (l.price, l.quantity)).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        pairs
    };
    (
        dump(book.top_bids(usize::MAX)),
        dump(book.top_asks(usize::MAX)),
    )
}

#[test]
fn all_strategies_agree_on_final_contents() {
    let config = WorkloadConfig::default();
    let reference = final_contents::<TreeMap>(config);

    assert!(!reference.0.is_empty());
    assert!(!reference.1.is_empty());

    assert_eq!(reference, final_contents::<LinearScan>(config), "linear-scan");
    assert_eq!(
        reference,
        final_contents::<SortedArray>(config),
        "sorted-array"
    );
    assert_eq!(reference, final_contents::<FlatMap>(config), "flat-map");
    assert_eq!(reference, final_contents::<HashedTree>(config), "hashed-tree");
}

#[test]
fn equivalence_holds_for_a_shallow_book() {
    // A narrow price range forces heavy collision of inserts, overwrites,
    // and deletes on the same few levels.
    let config = WorkloadConfig {
        levels: 16,
        iterations: 5_000,
        seed: 7,
        ..Default::default()
    };
    let reference = final_contents::<TreeMap>(config);

    assert_eq!(reference, final_contents::<LinearScan>(config));
    assert_eq!(reference, final_contents::<SortedArray>(config));
    assert_eq!(reference, final_contents::<FlatMap>(config));
    assert_eq!(reference, final_contents::<HashedTree>(config));
}
