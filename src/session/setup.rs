//! Session setup and initialization

use crate::environment::Environment;
use crate::monitor::MonitorClient;
use crate::runtime::{WorkerChannels, start_workers};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
#[derive(Debug)]
pub struct SessionData {
    /// Backend being monitored
    pub environment: Environment,
    /// Channels to the running workers
    pub workers: WorkerChannels,
    /// Join handles for worker tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    /// Interval between status polls
    pub poll_interval: Duration,
}

/// Starts the status poller and device manager against `environment`.
pub fn setup_session(environment: Environment, poll_interval: Duration) -> SessionData {
    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let client = Arc::new(MonitorClient::new(environment.clone()));
    let (workers, join_handles) = start_workers(client, poll_interval, &shutdown_sender);

    SessionData {
        environment,
        workers,
        join_handles,
        shutdown_sender,
        poll_interval,
    }
}
