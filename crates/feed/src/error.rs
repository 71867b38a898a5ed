//! Feed boundary error types.

use orderbook::Side;
use thiserror::Error;

/// Errors raised while validating feed input before it reaches the engine.
///
/// The engine's snapshot precondition (no duplicate prices per side) is not
/// runtime-checked inside the stores, so malformed snapshots are rejected
/// here instead.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Snapshot carried the same price twice on one side.
    #[error("duplicate {side:?} level at {price} in snapshot for {instrument}")]
    DuplicateSnapshotLevel {
        instrument: String,
        side: Side,
        price: f64,
    },

    /// Price was zero, negative, or not finite.
    #[error("invalid price {price} in snapshot for {instrument}")]
    InvalidPrice { instrument: String, price: f64 },
}
