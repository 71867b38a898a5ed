//! Price-level limit order book with interchangeable backing stores.
//!
//! This crate maintains a price-ordered ledger of resting quantities on two
//! sides of a market (bids descending, asks ascending) and applies a stream
//! of incremental changes (inserts, quantity overwrites, deletions) while
//! preserving strict price ordering and detecting a crossed book.
//!
//! Five backing-store strategies implement the same [`LevelStore`] contract
//! with different asymptotic trade-offs, so they can be compared under an
//! identical workload:
//!
//! - [`LinearScan`] — unordered vector, O(n) lookup. Reference floor only;
//!   its top-of-book queries are unspecified.
//! - [`SortedArray`] — vector with binary search, full re-sort after every
//!   structural mutation.
//! - [`TreeMap`] — `BTreeMap`, ordering maintained structurally.
//! - [`FlatMap`] — contiguous vector kept sorted at all times, favoring
//!   iteration locality.
//! - [`HashedTree`] — tree for ordering plus a hash index for O(1) average
//!   update-path lookup.
//!
//! # Example
//!
//! ```rust
//! use orderbook::{OrderBook, Side, TreeMap};
//!
//! let mut book = OrderBook::<TreeMap>::new("BTC-USD");
//! book.build_side(Side::Bid, 100.0, 1.0);
//! book.build_side(Side::Ask, 101.0, 2.0);
//!
//! assert_eq!(book.best_bid().unwrap().price, 100.0);
//! assert_eq!(book.best_ask().unwrap().price, 101.0);
//! assert!(!book.is_crossed());
//!
//! // Quantity below epsilon deletes the level.
//! book.apply_update(Side::Ask, 101.0, 0.0);
//! assert!(book.best_ask().is_none());
//! ```

mod book;
mod level;
mod store;

pub use book::{OrderBook, Side};
pub use level::{PriceLevel, QTY_EPSILON};
pub use store::flat::FlatStore;
pub use store::indexed_tree::IndexedTreeStore;
pub use store::linear::LinearStore;
pub use store::sorted_vec::SortedVecStore;
pub use store::tree::TreeStore;
pub use store::{
    AskOrder, BidOrder, FlatMap, HashedTree, LevelStore, LinearScan, PriceOrder, SortedArray,
    Strategy, TreeMap,
};
