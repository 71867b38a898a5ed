//! Decoded feed events.
//!
//! The engine consumes numeric values; string-to-double decoding is the
//! upstream decoder's responsibility. These structs define the shape that
//! decoder hands over.

use orderbook::Side;
use serde::{Deserialize, Serialize};

/// Full replacement of an instrument's book, used at (re)subscription time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEvent {
    pub instrument: String,
    /// (price, quantity) pairs; arrival order is not significant.
    pub bids: Vec<(f64, f64)>,
    pub asks: Vec<(f64, f64)>,
}

/// One price-level change inside an update batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelChange {
    pub side: Side,
    pub price: f64,
    pub quantity: f64,
}

/// A batch of incremental changes for one instrument.
///
/// Changes apply in the given order: a later entry for the same price
/// overrides an earlier one within the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEvent {
    pub instrument: String,
    pub changes: Vec<LevelChange>,
}

/// Any event the feed can deliver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FeedEvent {
    Snapshot(SnapshotEvent),
    Update(UpdateEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoded_update_shape_is_stable() {
        let json = r#"{
            "instrument": "BTC-USD",
            "changes": [
                { "side": "Bid", "price": 100.0, "quantity": 1.5 },
                { "side": "Ask", "price": 101.0, "quantity": 0.0 }
            ]
        }"#;

        let event: UpdateEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.instrument, "BTC-USD");
        assert_eq!(event.changes.len(), 2);
        assert_eq!(event.changes[0].side, Side::Bid);
        assert_eq!(event.changes[1].quantity, 0.0);
    }

    #[test]
    fn snapshot_round_trips() {
        let event = SnapshotEvent {
            instrument: "ETH-USD".to_string(),
            bids: vec![(100.0, 1.0)],
            asks: vec![(101.0, 2.0)],
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: SnapshotEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.instrument, "ETH-USD");
        assert_eq!(back.bids, event.bids);
        assert_eq!(back.asks, event.asks);
    }
}
