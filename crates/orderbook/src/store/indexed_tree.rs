//! Hash-augmented tree store.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;
use slab::Slab;

use crate::level::{PriceLevel, QTY_EPSILON};
use crate::store::{LevelStore, PriceOrder};

/// Tree for ordering plus a hash index for O(1) average update-path lookup.
///
/// Levels live in a slab so the tree and the index both refer to them by a
/// stable handle rather than a raw reference. The three structures move in
/// lockstep: every structural change goes through [`IndexedTreeStore::attach`]
/// / [`IndexedTreeStore::detach`], the single mutation path, so the index can
/// never hold a handle the slab no longer backs.
#[derive(Debug, Default)]
pub struct IndexedTreeStore<O: PriceOrder> {
    levels: Slab<PriceLevel>,
    /// rank -> slab handle; forward iteration is best-first.
    ordered: BTreeMap<OrderedFloat<f64>, usize>,
    /// rank -> slab handle; constant-time existence check on the update path.
    index: FxHashMap<OrderedFloat<f64>, usize>,
    _order: PhantomData<O>,
}

impl<O: PriceOrder> IndexedTreeStore<O> {
    fn attach(&mut self, price: f64, quantity: f64) {
        let handle = self.levels.insert(PriceLevel::new(price, quantity));
        let rank = O::rank(price);
        self.ordered.insert(rank, handle);
        self.index.insert(rank, handle);
    }

    fn detach(&mut self, rank: OrderedFloat<f64>, handle: usize) {
        self.ordered.remove(&rank);
        self.index.remove(&rank);
        self.levels.remove(handle);
    }
}

impl<O: PriceOrder> LevelStore for IndexedTreeStore<O> {
    fn build(&mut self, price: f64, quantity: f64) {
        self.attach(price, quantity);
    }

    fn update(&mut self, price: f64, quantity: f64) {
        let rank = O::rank(price);
        match self.index.get(&rank).copied() {
            Some(handle) if quantity < QTY_EPSILON => self.detach(rank, handle),
            // The key is unchanged, so only the slab entry needs touching.
            Some(handle) => self.levels[handle].quantity = quantity,
            None if quantity >= QTY_EPSILON => self.attach(price, quantity),
            None => {}
        }
    }

    fn clear(&mut self) {
        self.levels.clear();
        self.ordered.clear();
        self.index.clear();
    }

    fn best(&self) -> Option<PriceLevel> {
        self.ordered
            .values()
            .next()
            .map(|handle| self.levels[*handle])
    }

    fn levels(&self, depth: usize) -> Vec<PriceLevel> {
        self.ordered
            .values()
            .take(depth)
            .map(|handle| self.levels[*handle])
            .collect()
    }

    fn len(&self) -> usize {
        self.ordered.len()
    }
}
