//! Deterministic synthetic snapshot + update stream generator.
//!
//! Every backing-store strategy is benchmarked and equivalence-tested against
//! the exact same sequence, so the generator is seeded and its statistical
//! shape is fixed: side uniform 50/50, integer prices uniform inside each
//! side's ladder range, and quantities drawn modulo 4 so a quarter of all
//! updates are deletions.
//!
//! # Example
//!
//! ```rust
//! use orderbook::{OrderBook, TreeMap};
//! use workload::{Workload, WorkloadConfig};
//!
//! let mut workload = Workload::new(WorkloadConfig::default());
//! let mut book = OrderBook::<TreeMap>::new("SYNTH-USD");
//!
//! workload.populate(&mut book);
//! assert!(!book.is_crossed());
//!
//! workload.replay(&mut book);
//! ```

use orderbook::{OrderBook, Side, Strategy};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Quantity modulus: `draw % 4` is zero with probability 1/4, so a quarter
/// of all updates delete their level.
const QTY_MODULUS: u64 = 4;

/// Shape of the synthetic stream.
#[derive(Debug, Clone, Copy)]
pub struct WorkloadConfig {
    /// Levels per side in the initial snapshot; also the width of each
    /// side's price range during the update phase.
    pub levels: u64,
    /// Number of incremental updates in the stream.
    pub iterations: usize,
    /// PRNG seed; identical seeds yield bit-identical streams.
    pub seed: u64,
    /// Best bid of the initial snapshot. Best ask is always one tick above,
    /// so the starting book is valid and uncrossed.
    pub best_bid: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            levels: 1_000,
            iterations: 10_000,
            seed: 0,
            best_bid: 100_000,
        }
    }
}

impl WorkloadConfig {
    fn best_ask(&self) -> u64 {
        self.best_bid + 1
    }
}

/// One synthetic change against the book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookUpdate {
    pub side: Side,
    pub price: f64,
    pub quantity: f64,
}

/// Seeded generator producing the snapshot ladder and the update stream.
#[derive(Debug)]
pub struct Workload {
    config: WorkloadConfig,
    rng: ChaCha8Rng,
}

impl Workload {
    /// Creates a generator seeded from `config.seed`.
    pub fn new(config: WorkloadConfig) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    /// The initial snapshot: `levels` bids descending from `best_bid` and
    /// `levels` asks ascending from `best_bid + 1`, each with quantity 1.0.
    ///
    /// Deterministic and independent of the PRNG state.
    pub fn snapshot(&self) -> Vec<BookUpdate> {
        let cfg = &self.config;
        let mut levels = Vec::with_capacity(2 * cfg.levels as usize);
        for i in 0..cfg.levels {
            levels.push(BookUpdate {
                side: Side::Bid,
                price: (cfg.best_bid - i) as f64,
                quantity: 1.0,
            });
        }
        for i in 0..cfg.levels {
            levels.push(BookUpdate {
                side: Side::Ask,
                price: (cfg.best_ask() + i) as f64,
                quantity: 1.0,
            });
        }
        levels
    }

    /// Draws the next incremental update, advancing the PRNG.
    pub fn next_update(&mut self) -> BookUpdate {
        let cfg = self.config;
        let side = if self.rng.gen_bool(0.5) {
            Side::Bid
        } else {
            Side::Ask
        };
        let price = match side {
            Side::Bid => self.rng.gen_range(cfg.best_bid - cfg.levels..=cfg.best_bid),
            Side::Ask => self
                .rng
                .gen_range(cfg.best_ask()..=cfg.best_ask() + cfg.levels),
        };
        let quantity = self.rng.gen::<u64>() % QTY_MODULUS;
        BookUpdate {
            side,
            price: price as f64,
            quantity: quantity as f64,
        }
    }

    /// The full update phase: `iterations` draws.
    pub fn updates(&mut self) -> Vec<BookUpdate> {
        (0..self.config.iterations)
            .map(|_| self.next_update())
            .collect()
    }

    /// Builds the snapshot ladder into `book`.
    pub fn populate<S: Strategy>(&self, book: &mut OrderBook<S>) {
        for level in self.snapshot() {
            book.build_side(level.side, level.price, level.quantity);
        }
    }

    /// Applies one full update phase to `book`, advancing the PRNG.
    pub fn replay<S: Strategy>(&mut self, book: &mut OrderBook<S>) {
        for _ in 0..self.config.iterations {
            let update = self.next_update();
            book.apply_update(update.side, update.price, update.quantity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderbook::TreeMap;

    #[test]
    fn snapshot_is_a_valid_uncrossed_ladder() {
        let workload = Workload::new(WorkloadConfig {
            levels: 10,
            ..Default::default()
        });
        let mut book = OrderBook::<TreeMap>::new("SYNTH-USD");
        workload.populate(&mut book);

        assert_eq!(book.bid_levels(), 10);
        assert_eq!(book.ask_levels(), 10);
        assert_eq!(book.best_bid().unwrap().price, 100_000.0);
        assert_eq!(book.best_ask().unwrap().price, 100_001.0);
        assert!(!book.is_crossed());
    }

    #[test]
    fn identical_seeds_yield_identical_streams() {
        let cfg = WorkloadConfig::default();
        let a = Workload::new(cfg).updates();
        let b = Workload::new(cfg).updates();
        assert_eq!(a.len(), cfg.iterations);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let base = WorkloadConfig::default();
        let a = Workload::new(base).updates();
        let b = Workload::new(WorkloadConfig { seed: 1, ..base }).updates();
        assert_ne!(a, b);
    }

    #[test]
    fn quantities_stay_in_modulus_range() {
        let mut workload = Workload::new(WorkloadConfig::default());
        for _ in 0..1_000 {
            let update = workload.next_update();
            assert!(update.quantity >= 0.0 && update.quantity < QTY_MODULUS as f64);
        }
    }

    #[test]
    fn prices_stay_inside_side_ranges() {
        let cfg = WorkloadConfig::default();
        let mut workload = Workload::new(cfg);
        for _ in 0..1_000 {
            let update = workload.next_update();
            match update.side {
                Side::Bid => {
                    assert!(update.price >= (cfg.best_bid - cfg.levels) as f64);
                    assert!(update.price <= cfg.best_bid as f64);
                }
                Side::Ask => {
                    assert!(update.price >= cfg.best_ask() as f64);
                    assert!(update.price <= (cfg.best_ask() + cfg.levels) as f64);
                }
            }
        }
    }
}
