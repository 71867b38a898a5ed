//! Feed-side coupling around the order book engine.
//!
//! This crate owns everything between an already-decoded market data feed
//! and the [`orderbook`] engine: the decoded event model, the instrument
//! registry with its latency accumulators, periodic reporting, and the
//! controller that reacts to a crossed book by discarding the transport
//! session and resubscribing for a fresh snapshot.
//!
//! Transport and textual decoding are external collaborators; only their
//! seams ([`Transport`], the event structs) live here.

mod controller;
mod error;
mod events;
mod registry;
mod stats;
mod timer;

pub use controller::{FeedConfig, FeedController, Transport};
pub use error::FeedError;
pub use events::{FeedEvent, LevelChange, SnapshotEvent, UpdateEvent};
pub use registry::{ApplyOutcome, BookRegistry};
pub use stats::{InstrumentStats, LatencyRecorder, LatencySummary};
pub use timer::ReportTimer;
