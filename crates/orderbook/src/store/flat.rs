//! Contiguous sorted flat-map store.

use std::marker::PhantomData;

use crate::level::{PriceLevel, QTY_EPSILON};
use crate::store::{LevelStore, PriceOrder};

/// Contiguous storage kept sorted best-first at all times.
///
/// Lookups are O(log n) via binary search; quantity overwrites happen in
/// place; inserts and erases shift the tail. The layout favors forward
/// iteration (top-N printing, crossed checks), which dominates on the feed
/// path.
#[derive(Debug, Default)]
pub struct FlatStore<O: PriceOrder> {
    levels: Vec<PriceLevel>,
    _order: PhantomData<O>,
}

impl<O: PriceOrder> FlatStore<O> {
    /// Binary search by rank: `Ok` holds the position of an existing level,
    /// `Err` the insertion point that keeps the side sorted.
    fn position(&self, price: f64) -> Result<usize, usize> {
        let pos = self
            .levels
            .partition_point(|level| O::rank(level.price) < O::rank(price));
        if pos < self.levels.len() && self.levels[pos].price == price {
            Ok(pos)
        } else {
            Err(pos)
        }
    }
}

impl<O: PriceOrder> LevelStore for FlatStore<O> {
    fn build(&mut self, price: f64, quantity: f64) {
        match self.position(price) {
            Ok(_) => {}
            Err(pos) => self.levels.insert(pos, PriceLevel::new(price, quantity)),
        }
    }

    fn update(&mut self, price: f64, quantity: f64) {
        match self.position(price) {
            Ok(pos) if quantity < QTY_EPSILON => {
                self.levels.remove(pos);
            }
            Ok(pos) => self.levels[pos].quantity = quantity,
            Err(pos) if quantity >= QTY_EPSILON => {
                self.levels.insert(pos, PriceLevel::new(price, quantity));
            }
            Err(_) => {}
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AskOrder, BidOrder};

    #[test]
    fn stays_sorted_through_mixed_mutations() {
        let mut store = FlatStore::<AskOrder>::default();
        store.build(103.0, 1.0);
        store.build(101.0, 1.0);
        store.build(105.0, 1.0);

        store.update(102.0, 2.0); // insert between
        store.update(103.0, 0.0); // erase middle
        store.update(105.0, 9.0); // overwrite in place

        let prices: Vec<f64> = store.levels(8).iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![101.0, 102.0, 105.0]);
        assert_eq!(store.levels(8)[2].quantity, 9.0);
    }

    #[test]
    fn bid_best_is_highest_price() {
        let mut store = FlatStore::<BidOrder>::default();
        store.build(99.0, 1.0);
        store.build(100.0, 1.0);
        assert_eq!(store.best().unwrap().price, 100.0);
    }
}
