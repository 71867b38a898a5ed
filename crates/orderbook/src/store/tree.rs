//! Balanced-tree store.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use ordered_float::OrderedFloat;

use crate::level::{PriceLevel, QTY_EPSILON};
use crate::store::{LevelStore, PriceOrder};

/// `BTreeMap` keyed by rank, so forward iteration is best-first for either
/// side. Ordering is structural; no explicit sort step exists.
#[derive(Debug, Default)]
pub struct TreeStore<O: PriceOrder> {
    levels: BTreeMap<OrderedFloat<f64>, f64>,
    _order: PhantomData<O>,
}

impl<O: PriceOrder> LevelStore for TreeStore<O> {
    fn build(&mut self, price: f64, quantity: f64) {
        self.levels.insert(O::rank(price), quantity);
    }

    fn update(&mut self, price: f64, quantity: f64) {
        if quantity < QTY_EPSILON {
            self.levels.remove(&O::rank(price));
        } else {
            self.levels.insert(O::rank(price), quantity);
        }
    }

    fn clear(&mut self) {
        self.levels.clear();
    }

    fn best(&self) -> Option<PriceLevel> {
        self.levels
            .iter()
            .next()
            .map(|(rank, qty)| PriceLevel::new(O::price(*rank), *qty))
    }

    fn levels(&self, depth: usize) -> Vec<PriceLevel> {
        self.levels
            .iter()
            .take(depth)
            .map(|(rank, qty)| PriceLevel::new(O::price(*rank), *qty))
            .collect()
    }

    fn len(&self) -> usize {
        self.levels.len()
    }
}
