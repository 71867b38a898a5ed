//! Unordered vector store with linear scans.

use std::marker::PhantomData;

use crate::level::{PriceLevel, QTY_EPSILON};
use crate::store::{LevelStore, PriceOrder};

/// Reference store: an append-only vector scanned linearly by price.
///
/// Ordering is never maintained, so [`LevelStore::best`] and
/// [`LevelStore::levels`] report insertion order and their results are
/// unspecified. The store exists as a performance floor for comparison with
/// the ordered strategies, not as a production candidate.
#[derive(Debug, Default)]
pub struct LinearStore<O: PriceOrder> {
    levels: Vec<PriceLevel>,
    _order: PhantomData<O>,
}

impl<O: PriceOrder> LevelStore for LinearStore<O> {
    fn build(&mut self, price: f64, quantity: f64) {
        self.levels.push(PriceLevel::new(price, quantity));
    }

    fn update(&mut self, price: f64, quantity: f64) {
        match self.levels.iter().position(|level| level.price == price) {
            Some(pos) if quantity < QTY_EPSILON => {
                self.levels.remove(pos);
            }
            Some(pos) => self.levels[pos].quantity = quantity,
            None if quantity >= QTY_EPSILON => {
                self.levels.push(PriceLevel::new(price, quantity));
            }
            None => {}
        }
    }

    fn clear(&mut self) {
        self.levels.clear();
    }

    // Unspecified: returns the oldest level, not the best-priced one.
    fn best(&self) -> Option<PriceLevel> {
        self.levels.first().copied()
    }

    // Unspecified: insertion order, not side order.
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
    use crate::store::AskOrder;

    #[test]
    fn erase_preserves_remaining_contents() {
        let mut store = LinearStore::<AskOrder>::default();
        store.build(101.0, 1.0);
        store.build(102.0, 2.0);
        store.build(103.0, 3.0);

        store.update(102.0, 0.0);

        assert_eq!(store.len(), 2);
        let prices: Vec<f64> = store.levels(usize::MAX).iter().map(|l| l.price).collect();
        assert!(prices.contains(&101.0));
        assert!(prices.contains(&103.0));
    }

    #[test]
    fn overwrite_does_not_duplicate() {
        let mut store = LinearStore::<AskOrder>::default();
        store.build(101.0, 1.0);
        store.update(101.0, 4.0);

        assert_eq!(store.len(), 1);
        assert_eq!(store.levels(1)[0].quantity, 4.0);
    }
}
