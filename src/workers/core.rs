//! Core worker utilities

use crate::error_classifier::LogLevel;
use crate::events::{Event, EventType, Update};
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send_poller_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
        update: Update,
    ) {
        let _ = self
            .sender
            .send(
                Event::status_poller_with_level(message, event_type, log_level)
                    .with_update(update),
            )
            .await;
    }

    pub async fn send_device_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
        update: Update,
    ) {
        let _ = self
            .sender
            .send(
                Event::device_manager_with_level(message, event_type, log_level)
                    .with_update(update),
            )
            .await;
    }
}

/// Requests an out-of-band status poll.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    sender: mpsc::Sender<()>,
}

impl RefreshHandle {
    pub fn new(sender: mpsc::Sender<()>) -> Self {
        Self { sender }
    }

    /// Queue one refresh. Requests beyond the queue capacity are dropped,
    /// since a queued poll will already show the newest state.
    pub fn request(&self) {
        let _ = self.sender.try_send(());
    }
}
