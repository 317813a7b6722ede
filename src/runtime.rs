//! Runtime wiring for the dashboard workers

use crate::consts::cli_consts::{COMMAND_QUEUE_SIZE, EVENT_QUEUE_SIZE, REFRESH_QUEUE_SIZE};
use crate::events::Event;
use crate::monitor::MonitorApi;
use crate::workers::core::{EventSender, RefreshHandle};
use crate::workers::device_manager::{DeviceCommand, DeviceManager};
use crate::workers::poller::StatusPoller;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Channels the UI uses to talk to running workers.
#[derive(Debug)]
pub struct WorkerChannels {
    pub event_receiver: mpsc::Receiver<Event>,
    pub command_sender: mpsc::Sender<DeviceCommand>,
    pub refresh: RefreshHandle,
}

/// Start the status poller and the device manager
pub fn start_workers(
    api: Arc<dyn MonitorApi>,
    poll_interval: Duration,
    shutdown_sender: &broadcast::Sender<()>,
) -> (WorkerChannels, Vec<JoinHandle<()>>) {
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let (refresh_sender, refresh_receiver) = mpsc::channel::<()>(REFRESH_QUEUE_SIZE);
    let (command_sender, command_receiver) = mpsc::channel::<DeviceCommand>(COMMAND_QUEUE_SIZE);

    let event_sender = EventSender::new(event_sender);
    let refresh = RefreshHandle::new(refresh_sender);

    let poller = StatusPoller::new(Arc::clone(&api), event_sender.clone(), poll_interval);
    let device_manager = DeviceManager::new(api, event_sender, refresh.clone());

    let join_handles = vec![
        poller.run(refresh_receiver, shutdown_sender.subscribe()),
        device_manager.run(command_receiver, shutdown_sender.subscribe()),
    ];

    (
        WorkerChannels {
            event_receiver,
            command_sender,
            refresh,
        },
        join_handles,
    )
}
