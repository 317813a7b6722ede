//! Fixed-interval status polling

use super::core::EventSender;
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{EventType, Update};
use crate::monitor::MonitorApi;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const HEALTH_UNKNOWN: u8 = 0;
const HEALTH_OK: u8 = 1;
const HEALTH_FAILING: u8 = 2;

/// Outcome of the most recently finished poll, used to log connection
/// changes once instead of on every tick.
#[derive(Debug)]
pub struct PollHealth(AtomicU8);

impl Default for PollHealth {
    fn default() -> Self {
        Self(AtomicU8::new(HEALTH_UNKNOWN))
    }
}

impl PollHealth {
    /// Records a success and returns true if this changes the reported health.
    fn mark_ok(&self) -> bool {
        self.0.swap(HEALTH_OK, Ordering::Relaxed) != HEALTH_OK
    }

    /// Records a failure and returns true if this changes the reported health.
    fn mark_failing(&self) -> bool {
        self.0.swap(HEALTH_FAILING, Ordering::Relaxed) != HEALTH_FAILING
    }

    fn was_failing(&self) -> bool {
        self.0.load(Ordering::Relaxed) == HEALTH_FAILING
    }

    #[cfg(test)]
    pub fn is_unknown(&self) -> bool {
        self.0.load(Ordering::Relaxed) == HEALTH_UNKNOWN
    }
}

/// Polls the status endpoint on a fixed interval and on demand.
///
/// Every poll runs as its own task so a slow response never delays the next
/// tick. Polls are numbered in dispatch order; the dashboard uses that number
/// to drop outcomes that arrive after a newer one.
pub struct StatusPoller {
    api: Arc<dyn MonitorApi>,
    event_sender: EventSender,
    interval: Duration,
    sequence: Arc<AtomicU64>,
    health: Arc<PollHealth>,
}

impl StatusPoller {
    pub fn new(api: Arc<dyn MonitorApi>, event_sender: EventSender, interval: Duration) -> Self {
        Self {
            api,
            event_sender,
            interval,
            sequence: Arc::new(AtomicU64::new(0)),
            health: Arc::new(PollHealth::default()),
        }
    }

    /// Start the polling loop
    pub fn run(
        self,
        mut refresh_requests: mpsc::Receiver<()>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown.recv() => break,
                    _ = ticker.tick() => {
                        self.dispatch();
                    }
                    Some(()) = refresh_requests.recv() => {
                        self.dispatch();
                    }
                }
            }
        })
    }

    /// Spawn one poll and return its sequence number.
    pub fn dispatch(&self) -> u64 {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let api = Arc::clone(&self.api);
        let event_sender = self.event_sender.clone();
        let health = Arc::clone(&self.health);
        tokio::spawn(async move {
            poll_once(api.as_ref(), &event_sender, seq, &health).await;
        });
        seq
    }
}

/// Fetch one snapshot and report the outcome as an event.
pub async fn poll_once(
    api: &dyn MonitorApi,
    event_sender: &EventSender,
    seq: u64,
    health: &PollHealth,
) {
    match api.get_status().await {
        Ok(snapshot) => {
            let recovered = health.was_failing();
            let changed = health.mark_ok();
            let (message, log_level) = if recovered {
                (
                    format!(
                        "Connection restored: {} devices monitored",
                        snapshot.device_list.len()
                    ),
                    LogLevel::Info,
                )
            } else if changed {
                (
                    format!(
                        "Connected to {}: {} devices monitored",
                        api.environment().server_url(),
                        snapshot.device_list.len()
                    ),
                    LogLevel::Info,
                )
            } else {
                (
                    format!("Status refreshed ({} devices)", snapshot.device_list.len()),
                    LogLevel::Debug,
                )
            };
            event_sender
                .send_poller_event(
                    message,
                    EventType::Refresh,
                    log_level,
                    Update::Snapshot { seq, snapshot },
                )
                .await;
        }
        Err(e) => {
            let changed = health.mark_failing();
            // Repeated failures of an already failing backend are debug noise.
            let log_level = if changed {
                ErrorClassifier::new().classify_poll_error(&e)
            } else {
                LogLevel::Debug
            };
            event_sender
                .send_poller_event(
                    format!("Error checking status: {}", e),
                    EventType::Error,
                    log_level,
                    Update::PollFailed { seq },
                )
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::events::Event;
    use crate::monitor::MockMonitorApi;
    use crate::monitor::error::MonitorError;
    use crate::snapshot::StatusSnapshot;

    #[tokio::test]
    /// A successful poll reports its snapshot with the dispatch sequence number.
    async fn test_poll_once_success() {
        let mut api = MockMonitorApi::new();
        api.expect_environment().return_const(Environment::Local);
        api.expect_get_status()
            .times(1)
            .returning(|| Ok(StatusSnapshot::default()));

        let (tx, mut rx) = mpsc::channel::<Event>(4);
        let health = PollHealth::default();
        poll_once(&api, &EventSender::new(tx), 7, &health).await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::Refresh);
        assert_eq!(event.log_level, LogLevel::Info);
        assert!(matches!(
            event.update,
            Some(Update::Snapshot { seq: 7, .. })
        ));
        assert!(!health.is_unknown());
    }

    #[tokio::test]
    /// Only the first failure in a row is logged above debug level.
    async fn test_repeated_failures_are_quiet() {
        let mut api = MockMonitorApi::new();
        api.expect_get_status().times(2).returning(|| {
            Err(MonitorError::Http {
                status: 503,
                message: "unavailable".to_string(),
            })
        });

        let (tx, mut rx) = mpsc::channel::<Event>(4);
        let sender = EventSender::new(tx);
        let health = PollHealth::default();
        poll_once(&api, &sender, 1, &health).await;
        poll_once(&api, &sender, 2, &health).await;

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.log_level, LogLevel::Warn);
        assert_eq!(second.log_level, LogLevel::Debug);
        assert_eq!(second.update, Some(Update::PollFailed { seq: 2 }));
        assert!(first.msg.starts_with("Error checking status"));
    }

    #[tokio::test]
    /// An undecodable status body is reported like any other failed poll.
    async fn test_malformed_body_reports_poll_failure() {
        let mut api = MockMonitorApi::new();
        api.expect_get_status().times(1).returning(|| {
            Err(MonitorError::Decode(
                serde_json::from_str::<StatusSnapshot>("{}").unwrap_err(),
            ))
        });

        let (tx, mut rx) = mpsc::channel::<Event>(4);
        let health = PollHealth::default();
        poll_once(&api, &EventSender::new(tx), 3, &health).await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::Error);
        assert_eq!(event.log_level, LogLevel::Error);
        assert_eq!(event.update, Some(Update::PollFailed { seq: 3 }));
    }

    #[tokio::test]
    /// A success after failures is reported as a restored connection.
    async fn test_recovery_is_logged() {
        let mut api = MockMonitorApi::new();
        let mut calls = 0;
        api.expect_get_status().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Err(MonitorError::Rejected {
                    message: "down".to_string(),
                })
            } else {
                Ok(StatusSnapshot::default())
            }
        });

        let (tx, mut rx) = mpsc::channel::<Event>(4);
        let sender = EventSender::new(tx);
        let health = PollHealth::default();
        poll_once(&api, &sender, 1, &health).await;
        poll_once(&api, &sender, 2, &health).await;

        let _failure = rx.recv().await.unwrap();
        let recovery = rx.recv().await.unwrap();
        assert!(recovery.msg.starts_with("Connection restored"));
        assert_eq!(recovery.log_level, LogLevel::Info);
    }

    #[tokio::test]
    /// Dispatch numbers polls in increasing order.
    async fn test_dispatch_sequence_is_monotonic() {
        let mut api = MockMonitorApi::new();
        api.expect_environment().return_const(Environment::Local);
        api.expect_get_status()
            .returning(|| Ok(StatusSnapshot::default()));

        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let poller = StatusPoller::new(
            Arc::new(api),
            EventSender::new(tx),
            Duration::from_millis(500),
        );

        assert_eq!(poller.dispatch(), 1);
        assert_eq!(poller.dispatch(), 2);
        assert_eq!(poller.dispatch(), 3);

        let mut seen = Vec::new();
        for _ in 0..3 {
            if let Some(Update::Snapshot { seq, .. }) = rx.recv().await.unwrap().update {
                seen.push(seq);
            }
        }
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[tokio::test]
    /// The loop polls immediately, honours refresh requests and stops on shutdown.
    async fn test_run_loop_refresh_and_shutdown() {
        let mut api = MockMonitorApi::new();
        api.expect_environment().return_const(Environment::Local);
        api.expect_get_status()
            .returning(|| Ok(StatusSnapshot::default()));

        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let (refresh_tx, refresh_rx) = mpsc::channel(1);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let poller = StatusPoller::new(
            Arc::new(api),
            EventSender::new(tx),
            Duration::from_secs(3600),
        );
        let handle = poller.run(refresh_rx, shutdown_rx);

        // The first tick of a tokio interval fires immediately.
        let first = rx.recv().await.unwrap();
        assert!(matches!(first.update, Some(Update::Snapshot { .. })));

        refresh_tx.send(()).await.unwrap();
        let second = rx.recv().await.unwrap();
        assert!(matches!(second.update, Some(Update::Snapshot { .. })));

        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();
    }
}
