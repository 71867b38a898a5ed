//! Price level representation.

/// Minimum quantity distinguishing an active level from a deletion signal.
///
/// An incoming quantity below this threshold is never stored: it deletes the
/// level at that price if one exists and is a no-op otherwise.
pub const QTY_EPSILON: f64 = 1e-9;

/// A single price level in the order book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLevel {
    /// The price at this level. Acts as the unique key within a side.
    pub price: f64,
    /// The total resting quantity at this price.
    pub quantity: f64,
}

impl PriceLevel {
    /// Creates a new price level.
    pub fn new(price: f64, quantity: f64) -> Self {
        Self { price, quantity }
    }

    /// Returns the notional value (price * quantity) at this level.
    pub fn notional(&self) -> f64 {
        self.price * self.quantity
    }
}
