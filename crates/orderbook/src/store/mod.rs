//! Backing-store strategies for one side of a book.
//!
//! Every strategy implements [`LevelStore`] for a single side, parameterized
//! over a [`PriceOrder`] so the same concrete type serves bids (descending)
//! and asks (ascending). A [`Strategy`] marker pairs the store type on both
//! sides of an [`crate::OrderBook`].

pub mod flat;
pub mod indexed_tree;
pub mod linear;
pub mod sorted_vec;
pub mod tree;

use ordered_float::OrderedFloat;

use crate::level::PriceLevel;

/// Compile-time ordering of one book side.
///
/// `rank` maps a price to a monotone key whose ascending order is the side's
/// best-first order: bids rank on the negated price so the highest bid sorts
/// first, asks rank on the price itself.
pub trait PriceOrder: Copy + Default {
    /// Returns true when `a` ranks strictly closer to the top of book than `b`.
    fn better(a: f64, b: f64) -> bool;

    /// Sort key for `price`; ascending key order is best-first side order.
    fn rank(price: f64) -> OrderedFloat<f64>;

    /// Inverse of [`PriceOrder::rank`].
    fn price(rank: OrderedFloat<f64>) -> f64;
}

/// Bid ordering: best price first means descending by price.
#[derive(Debug, Clone, Copy, Default)]
pub struct BidOrder;

impl PriceOrder for BidOrder {
    fn better(a: f64, b: f64) -> bool {
        a > b
    }

    fn rank(price: f64) -> OrderedFloat<f64> {
        OrderedFloat(-price)
    }

    fn price(rank: OrderedFloat<f64>) -> f64 {
        -rank.0
    }
}

/// Ask ordering: best price first means ascending by price.
#[derive(Debug, Clone, Copy, Default)]
pub struct AskOrder;

impl PriceOrder for AskOrder {
    fn better(a: f64, b: f64) -> bool {
        a < b
    }

    fn rank(price: f64) -> OrderedFloat<f64> {
        OrderedFloat(price)
    }

    fn price(rank: OrderedFloat<f64>) -> f64 {
        rank.0
    }
}

/// Common contract implemented by every backing-store strategy for one side.
///
/// All mutations key on exact price equality: prices within one feed arrive
/// as identical bit patterns, so no tolerance comparison is applied.
pub trait LevelStore: Default {
    /// Inserts a level during snapshot construction.
    ///
    /// The price must not already be present in the side; an honest snapshot
    /// never carries duplicates and callers validate before reaching the
    /// engine. Sub-epsilon quantities are likewise filtered upstream.
    fn build(&mut self, price: f64, quantity: f64);

    /// Upsert-or-delete by price.
    ///
    /// If a level at `price` exists: a quantity below [`crate::QTY_EPSILON`]
    /// deletes it, otherwise its quantity is overwritten. If absent: a
    /// sub-epsilon quantity is a no-op, otherwise a new level is inserted.
    fn update(&mut self, price: f64, quantity: f64);

    /// Removes every level.
    fn clear(&mut self);

    /// The level closest to the top of book, if any.
    fn best(&self) -> Option<PriceLevel>;

    /// Up to `depth` levels starting from the best price outward.
    fn levels(&self, depth: usize) -> Vec<PriceLevel>;

    /// Number of resting levels.
    fn len(&self) -> usize;

    /// Returns true when the side holds no levels.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A backing-store strategy: the same store type instantiated for both sides.
pub trait Strategy {
    /// Human-readable name used in reports and benchmarks.
    const NAME: &'static str;

    /// Concrete side store for the given price ordering.
    type Side<O: PriceOrder>: LevelStore;
}

/// Unordered vector with linear scans. Performance floor; ordering is not
/// maintained, so its top-of-book results are unspecified.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearScan;

impl Strategy for LinearScan {
    const NAME: &'static str = "linear-scan";
    type Side<O: PriceOrder> = linear::LinearStore<O>;
}

/// Sorted vector with binary search and a full re-sort after every
/// structural mutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortedArray;

impl Strategy for SortedArray {
    const NAME: &'static str = "sorted-array";
    type Side<O: PriceOrder> = sorted_vec::SortedVecStore<O>;
}

/// Balanced tree map; ordering is structural.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeMap;

impl Strategy for TreeMap {
    const NAME: &'static str = "tree-map";
    type Side<O: PriceOrder> = tree::TreeStore<O>;
}

/// Contiguous sorted vector kept ordered at all times; favors iteration
/// locality on the read-dominated feed path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatMap;

impl Strategy for FlatMap {
    const NAME: &'static str = "flat-map";
    type Side<O: PriceOrder> = flat::FlatStore<O>;
}

/// Tree for ordering plus a hash index for O(1) average update-path lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashedTree;

impl Strategy for HashedTree {
    const NAME: &'static str = "hashed-tree";
    type Side<O: PriceOrder> = indexed_tree::IndexedTreeStore<O>;
}
