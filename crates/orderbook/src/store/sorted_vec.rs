//! Sorted vector store with binary search and full re-sorts.

use std::marker::PhantomData;

use crate::level::{PriceLevel, QTY_EPSILON};
use crate::store::{LevelStore, PriceOrder};

/// Baseline store: a vector binary-searched by rank, paying a full
/// O(n log n) re-sort after every structural mutation.
///
/// Correctness-safe but deliberately naive; the smarter strategies are
/// measured against it.
#[derive(Debug, Default)]
pub struct SortedVecStore<O: PriceOrder> {
    levels: Vec<PriceLevel>,
    _order: PhantomData<O>,
}

impl<O: PriceOrder> SortedVecStore<O> {
    fn resort(&mut self) {
        self.levels
            .sort_by_key(|level| O::rank(level.price));
    }

    /// Index of the level at `price`, if present.
    fn find(&self, price: f64) -> Option<usize> {
        let pos = self
            .levels
            .partition_point(|level| O::rank(level.price) < O::rank(price));
        (pos < self.levels.len() && self.levels[pos].price == price).then_some(pos)
    }
}

impl<O: PriceOrder> LevelStore for SortedVecStore<O> {
    fn build(&mut self, price: f64, quantity: f64) {
        self.levels.push(PriceLevel::new(price, quantity));
        self.resort();
    }

    fn update(&mut self, price: f64, quantity: f64) {
        match self.find(price) {
            Some(pos) if quantity < QTY_EPSILON => {
                self.levels.remove(pos);
                self.resort();
            }
            Some(pos) => self.levels[pos].quantity = quantity,
            None if quantity >= QTY_EPSILON => {
                self.levels.push(PriceLevel::new(price, quantity));
                self.resort();
            }
            None => {}
        }
    }

    fn clear(&mut self) {
        self.levels.clear();
    }

    fn best(&self) -> Option<PriceLevel> {
        self.levels.first().copied()
    }

    fn levels(&self, depth: usize) -> Vec<PriceLevel> {
        self.levels.iter().take(depth).copied().collect()
    }

    fn len(&self) -> usize {
        self.levels.len()
    }
}
