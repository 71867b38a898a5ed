//! Instrument registry: books, timing accumulators, and reporting.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::Instant;

use orderbook::{OrderBook, Side, Strategy, QTY_EPSILON};
use tracing::{debug, warn};

use crate::error::FeedError;
use crate::events::{SnapshotEvent, UpdateEvent};
use crate::stats::InstrumentStats;

/// Result of applying an update event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// All changes applied; the book remains well-formed.
    Applied,
    /// The instrument was never snapshotted; the event was dropped.
    UnknownInstrument,
    /// The book is crossed after this batch: the feed is desynchronized and
    /// the caller must resubscribe for a fresh snapshot.
    Crossed,
}

/// Maps instrument identifiers to books and per-instrument latency
/// accumulators.
///
/// Entries are created on first snapshot and never implicitly removed.
/// Single-writer by contract; nothing here locks.
pub struct BookRegistry<S: Strategy> {
    books: HashMap<String, OrderBook<S>>,
    stats: HashMap<String, InstrumentStats>,
}

impl<S: Strategy> BookRegistry<S> {
    pub fn new() -> Self {
        Self {
            books: HashMap::new(),
            stats: HashMap::new(),
        }
    }

    /// Applies a snapshot: allocates the book on first sight, otherwise
    /// clears and rebuilds it, and records the elapsed build time.
    ///
    /// Malformed snapshots (duplicate or non-positive prices) are rejected
    /// before touching the book, since the stores treat duplicate snapshot
    /// prices as a precondition, not a checked error. Sub-epsilon quantities
    /// are skipped rather than stored.
    pub fn on_snapshot(&mut self, event: &SnapshotEvent) -> Result<(), FeedError> {
        validate_snapshot(event)?;

        let book = self
            .books
            .entry(event.instrument.clone())
            .or_insert_with(|| OrderBook::new(event.instrument.clone()));
        let stats = self.stats.entry(event.instrument.clone()).or_default();

        let start = Instant::now();
        book.clear();
        for &(price, quantity) in &event.bids {
            if quantity >= QTY_EPSILON {
                book.build_side(Side::Bid, price, quantity);
            }
        }
        for &(price, quantity) in &event.asks {
            if quantity >= QTY_EPSILON {
                book.build_side(Side::Ask, price, quantity);
            }
        }
        stats.snapshot_build.record(start.elapsed());

        debug!(
            instrument = %event.instrument,
            bids = book.bid_levels(),
            asks = book.ask_levels(),
            "snapshot applied"
        );
        Ok(())
    }

    /// Applies an update batch in order, timing each change individually,
    /// then evaluates the crossed check.
    ///
    /// An update for an instrument with no prior snapshot is dropped and
    /// logged: a boundary condition, not an error.
    pub fn on_update(&mut self, event: &UpdateEvent) -> ApplyOutcome {
        let Some(book) = self.books.get_mut(&event.instrument) else {
            warn!(
                instrument = %event.instrument,
                changes = event.changes.len(),
                "update for unknown instrument dropped"
            );
            return ApplyOutcome::UnknownInstrument;
        };
        let stats = self.stats.entry(event.instrument.clone()).or_default();

        for change in &event.changes {
            let start = Instant::now();
            book.apply_update(change.side, change.price, change.quantity);
            stats.update_apply.record(start.elapsed());
        }

        if book.is_crossed() {
            warn!(instrument = %event.instrument, "crossed book detected");
            ApplyOutcome::Crossed
        } else {
            ApplyOutcome::Applied
        }
    }

    pub fn book(&self, instrument: &str) -> Option<&OrderBook<S>> {
        self.books.get(instrument)
    }

    pub fn stats(&self, instrument: &str) -> Option<&InstrumentStats> {
        self.stats.get(instrument)
    }

    /// Tracked instruments, sorted for stable output.
    pub fn instruments(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.books.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Renders top-of-book and latency statistics for every instrument,
    /// then resets the accumulators so reporting windows never overlap.
    pub fn report(&mut self, depth: usize) -> String {
        let mut out = String::new();

        for instrument in self.instruments() {
            let book = &self.books[instrument];
            let _ = writeln!(out, "limit order book: {} ({})", instrument, S::NAME);

            let _ = writeln!(out, "ask levels:");
            for (rank, level) in book.top_asks(depth).iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  level {} - price: {:.2}, quantity: {:.8}",
                    rank + 1,
                    level.price,
                    level.quantity
                );
            }

            let _ = writeln!(out, "bid levels:");
            for (rank, level) in book.top_bids(depth).iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  level {} - price: {:.2}, quantity: {:.8}",
                    rank + 1,
                    level.price,
                    level.quantity
                );
            }
        }

        let mut tracked: Vec<String> = self.stats.keys().cloned().collect();
        tracked.sort_unstable();
        for instrument in tracked {
            let Some(stats) = self.stats.get_mut(&instrument) else {
                continue;
            };
            if let Some(summary) = stats.snapshot_build.summary() {
                let _ = writeln!(out, "{} snapshot build:\n{}", instrument, summary);
            }
            if let Some(summary) = stats.update_apply.summary() {
                let _ = writeln!(out, "{} update apply:\n{}", instrument, summary);
            }
            stats.reset();
        }

        out
    }
}

impl<S: Strategy> Default for BookRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_snapshot(event: &SnapshotEvent) -> Result<(), FeedError> {
    for (side, levels) in [(Side::Bid, &event.bids), (Side::Ask, &event.asks)] {
        let mut seen = std::collections::HashSet::with_capacity(levels.len());
        for &(price, _) in levels {
            if !price.is_finite() || price <= 0.0 {
                return Err(FeedError::InvalidPrice {
                    instrument: event.instrument.clone(),
                    price,
                });
            }
            // Prices are keys; compare exact bit patterns.
            if !seen.insert(price.to_bits()) {
                return Err(FeedError::DuplicateSnapshotLevel {
                    instrument: event.instrument.clone(),
                    side,
                    price,
                });
            }
        }
    }
    Ok(())
}
