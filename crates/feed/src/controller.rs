//! Feed controller: event dispatch, periodic reporting, and the
//! crossed-book resynchronization transition.

use std::time::Duration;

use orderbook::Strategy;
use tracing::{info, warn};

use crate::events::FeedEvent;
use crate::registry::{ApplyOutcome, BookRegistry};
use crate::timer::ReportTimer;

/// Seam to the external transport.
///
/// The real transport (websocket session, subscription handshake) is an
/// external collaborator; the controller only needs to open sessions and
/// drop them. A session's teardown happens in its `Drop` impl.
pub trait Transport {
    type Session;

    /// Issues the subscription handshake and returns the live session.
    /// A fresh snapshot for each instrument is expected to follow.
    fn open(&mut self, instruments: &[String]) -> Self::Session;
}

/// Controller configuration.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Instruments to subscribe to.
    pub instruments: Vec<String>,
    /// Levels per side in periodic reports.
    pub report_depth: usize,
    /// Reporting interval; windows are non-overlapping.
    pub report_interval: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            instruments: vec!["BTC-USD".to_string()],
            report_depth: 5,
            report_interval: Duration::from_secs(5),
        }
    }
}

/// Owns the registry and the transport session, and reacts to the crossed
/// signal with an explicit, synchronous resubscribe transition.
pub struct FeedController<S: Strategy, T: Transport> {
    config: FeedConfig,
    registry: BookRegistry<S>,
    transport: T,
    session: Option<T::Session>,
    timer: ReportTimer,
}

impl<S: Strategy, T: Transport> FeedController<S, T> {
    pub fn new(config: FeedConfig, transport: T) -> Self {
        let timer = ReportTimer::new(config.report_interval);
        Self {
            config,
            registry: BookRegistry::new(),
            transport,
            session: None,
            timer,
        }
    }

    /// Opens the initial transport session.
    pub fn subscribe(&mut self) {
        info!(instruments = ?self.config.instruments, "subscribing to market data");
        self.session = Some(self.transport.open(&self.config.instruments));
    }

    /// Dispatches one decoded feed event into the registry.
    ///
    /// A malformed snapshot is rejected and logged, never applied. A crossed
    /// book after an update triggers resynchronization.
    pub fn on_event(&mut self, event: &FeedEvent) {
        match event {
            FeedEvent::Snapshot(snapshot) => {
                if let Err(e) = self.registry.on_snapshot(snapshot) {
                    warn!(error = %e, "rejected malformed snapshot");
                }
            }
            FeedEvent::Update(update) => {
                if self.registry.on_update(update) == ApplyOutcome::Crossed {
                    self.resynchronize();
                }
            }
        }
    }

    /// Tears down the current session and re-issues the subscription
    /// handshake to force fresh snapshots.
    ///
    /// The crossed book itself is left untouched until its snapshot arrives;
    /// crossing is resolved by replacement, not in-place repair. The old
    /// session is fully discarded before the new one is requested, so the
    /// two never overlap.
    fn resynchronize(&mut self) {
        warn!("crossed book: discarding session and resubscribing");
        self.session = None;
        self.session = Some(self.transport.open(&self.config.instruments));
    }

    /// Renders a report when the interval has elapsed.
    pub fn poll_report(&mut self) -> Option<String> {
        self.timer
            .due()
            .then(|| self.registry.report(self.config.report_depth))
    }

    /// Renders a report immediately, outside the periodic schedule.
    pub fn report(&mut self) -> String {
        self.registry.report(self.config.report_depth)
    }

    pub fn registry(&self) -> &BookRegistry<S> {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{LevelChange, SnapshotEvent, UpdateEvent};
    use orderbook::{FlatMap, Side};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records session lifecycle so tests can assert teardown ordering.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum SessionLog {
        Opened(usize),
        Closed(usize),
    }

    #[derive(Default)]
    struct MockTransport {
        log: Rc<RefCell<Vec<SessionLog>>>,
        next_id: usize,
    }

    struct MockSession {
        id: usize,
        log: Rc<RefCell<Vec<SessionLog>>>,
    }

    impl Drop for MockSession {
        fn drop(&mut self) {
            self.log.borrow_mut().push(SessionLog::Closed(self.id));
        }
    }

    impl Transport for MockTransport {
        type Session = MockSession;

        fn open(&mut self, _instruments: &[String]) -> MockSession {
            self.next_id += 1;
            self.log.borrow_mut().push(SessionLog::Opened(self.next_id));
            MockSession {
                id: self.next_id,
                log: self.log.clone(),
            }
        }
    }

    fn controller() -> (
        FeedController<FlatMap, MockTransport>,
        Rc<RefCell<Vec<SessionLog>>>,
    ) {
        let transport = MockTransport::default();
        let log = transport.log.clone();
        let config = FeedConfig {
            instruments: vec!["BTC-USD".to_string()],
            report_depth: 5,
            report_interval: Duration::from_secs(3600),
        };
        (FeedController::new(config, transport), log)
    }

    fn snapshot_event() -> FeedEvent {
        FeedEvent::Snapshot(SnapshotEvent {
            instrument: "BTC-USD".to_string(),
            bids: vec![(100.0, 1.0), (99.0, 1.0)],
            asks: vec![(101.0, 1.0), (102.0, 1.0)],
        })
    }

    fn bid_update(price: f64, quantity: f64) -> FeedEvent {
        FeedEvent::Update(UpdateEvent {
            instrument: "BTC-USD".to_string(),
            changes: vec![LevelChange {
                side: Side::Bid,
                price,
                quantity,
            }],
        })
    }

    #[test]
    fn normal_updates_do_not_touch_the_session() {
        let (mut controller, log) = controller();
        controller.subscribe();
        controller.on_event(&snapshot_event());
        controller.on_event(&bid_update(100.0, 3.0));

        assert_eq!(&*log.borrow(), &[SessionLog::Opened(1)]);
        let book = controller.registry().book("BTC-USD").unwrap();
        assert_eq!(book.best_bid().unwrap().quantity, 3.0);
    }

    #[test]
    fn crossed_book_discards_old_session_before_opening_new() {
        let (mut controller, log) = controller();
        controller.subscribe();
        controller.on_event(&snapshot_event());

        // Bid crossing into the ask side desynchronizes the feed.
        controller.on_event(&bid_update(101.0, 1.0));

        assert_eq!(
            &*log.borrow(),
            &[
                SessionLog::Opened(1),
                SessionLog::Closed(1),
                SessionLog::Opened(2),
            ]
        );
    }

    #[test]
    fn crossed_book_is_replaced_by_the_next_snapshot() {
        let (mut controller, log) = controller();
        controller.subscribe();
        controller.on_event(&snapshot_event());
        controller.on_event(&bid_update(101.0, 1.0));

        // The book stays crossed until the fresh snapshot lands.
        assert!(controller.registry().book("BTC-USD").unwrap().is_crossed());

        controller.on_event(&snapshot_event());
        assert!(!controller.registry().book("BTC-USD").unwrap().is_crossed());
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn malformed_snapshot_is_rejected_not_applied() {
        let (mut controller, _log) = controller();
        controller.subscribe();

        controller.on_event(&FeedEvent::Snapshot(SnapshotEvent {
            instrument: "BTC-USD".to_string(),
            bids: vec![(100.0, 1.0), (100.0, 2.0)],
            asks: vec![],
        }));

        assert!(controller.registry().book("BTC-USD").is_none());
    }

    #[test]
    fn report_contains_levels_and_stats() {
        let (mut controller, _log) = controller();
        controller.subscribe();
        controller.on_event(&snapshot_event());
        controller.on_event(&bid_update(100.0, 2.0));

        // Long interval: nothing due yet.
        assert!(controller.poll_report().is_none());

        let report = controller.report();
        assert!(report.contains("BTC-USD"));
        assert!(report.contains("update apply:"));
    }
}
