//! Order book pairing two same-strategy side stores.

use serde::{Deserialize, Serialize};

use crate::level::PriceLevel;
use crate::store::{AskOrder, BidOrder, LevelStore, Strategy};

/// Book side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Buy side, best price first means descending.
    Bid,
    /// Sell side, best price first means ascending.
    Ask,
}

impl Side {
    /// Decodes the feed's single-character side tag ('b' buy, 's' sell).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'b' => Some(Side::Bid),
            's' => Some(Side::Ask),
            _ => None,
        }
    }
}

/// One instrument's book: a bid side and an ask side backed by the same
/// store strategy.
///
/// The book is single-writer by contract: every operation runs to completion
/// before the next is accepted, and callers serialize access. Nothing here
/// locks.
pub struct OrderBook<S: Strategy> {
    symbol: String,
    bids: S::Side<BidOrder>,
    asks: S::Side<AskOrder>,
}

impl<S: Strategy> OrderBook<S> {
    /// Creates a new empty order book for the given symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: Default::default(),
            asks: Default::default(),
        }
    }

    /// Returns the symbol this order book tracks.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Inserts one level during snapshot construction.
    ///
    /// Snapshot input may arrive in any order; the side still ends sorted
    /// (LinearScan excepted, by its documented contract).
    pub fn build_side(&mut self, side: Side, price: f64, quantity: f64) {
        match side {
            Side::Bid => self.bids.build(price, quantity),
            Side::Ask => self.asks.build(price, quantity),
        }
    }

    /// Applies one incremental change: insert, overwrite, or (sub-epsilon
    /// quantity) delete.
    pub fn apply_update(&mut self, side: Side, price: f64, quantity: f64) {
        match side {
            Side::Bid => self.bids.update(price, quantity),
            Side::Ask => self.asks.update(price, quantity),
        }
    }

    /// Empties both sides.
    pub fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
    }

    /// Returns true when the best bid price has reached or passed the best
    /// ask price. False whenever either side is empty.
    ///
    /// A crossed book signals feed desynchronization; it is resolved by
    /// resubscribing for a fresh snapshot, never repaired in place.
    pub fn is_crossed(&self) -> bool {
        match (self.bids.best(), self.asks.best()) {
            (Some(bid), Some(ask)) => bid.price >= ask.price,
            _ => false,
        }
    }

    /// Returns the best (highest) bid price level.
    pub fn best_bid(&self) -> Option<PriceLevel> {
        self.bids.best()
    }

    /// Returns the best (lowest) ask price level.
    pub fn best_ask(&self) -> Option<PriceLevel> {
        self.asks.best()
    }

    /// Returns up to `n` bid levels, best first.
    pub fn top_bids(&self, n: usize) -> Vec<PriceLevel> {
        self.bids.levels(n)
    }

    /// Returns up to `n` ask levels, best first.
    pub fn top_asks(&self, n: usize) -> Vec<PriceLevel> {
        self.asks.levels(n)
    }

    /// Returns the total number of bid levels.
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Returns the total number of ask levels.
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }
}
