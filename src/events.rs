//! Event System
//!
//! Types and implementations for worker events and logging

use crate::error_classifier::LogLevel;
use crate::logging::should_log_with_env;
use crate::snapshot::StatusSnapshot;
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// Worker that polls the status endpoint.
    StatusPoller,
    /// Worker that forwards add/remove requests to the backend.
    DeviceManager,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
}

/// State carried by an event for the dashboard to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// A poll completed. `seq` orders polls by dispatch time.
    Snapshot { seq: u64, snapshot: StatusSnapshot },
    /// A poll failed.
    PollFailed { seq: u64 },
    DeviceAdded { name: String, message: Option<String> },
    AddFailed { name: String, error: String },
    DeviceRemoved { name: String, message: Option<String> },
    RemoveFailed { name: String, error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Optional payload for the dashboard state
    pub update: Option<Update>,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            update: None,
        }
    }

    pub fn status_poller_with_level(
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Worker::StatusPoller, msg, event_type, log_level)
    }

    pub fn device_manager_with_level(
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Worker::DeviceManager, msg, event_type, log_level)
    }

    pub fn with_update(mut self, update: Update) -> Self {
        self.update = Some(update);
        self
    }

    /// Copy of the event for the activity log, without its payload.
    pub fn log_entry(&self) -> Self {
        Self {
            update: None,
            ..self.clone()
        }
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }

    /// Mirror the event into the `log` facade.
    pub fn emit_log(&self) {
        let level: log::Level = self.log_level.into();
        log::log!(target: "netmon_dashboard::events", level, "{}", self);
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_drops_payload() {
        let event = Event::status_poller_with_level(
            "Status refreshed".to_string(),
            EventType::Refresh,
            LogLevel::Debug,
        )
        .with_update(Update::PollFailed { seq: 3 });

        let entry = event.log_entry();
        assert!(entry.update.is_none());
        assert_eq!(entry.msg, event.msg);
        assert_eq!(entry.timestamp, event.timestamp);
    }

    #[test]
    fn test_success_always_displayed() {
        let event = Event::device_manager_with_level(
            "Device added".to_string(),
            EventType::Success,
            LogLevel::Debug,
        );
        assert!(event.should_display());
    }

    #[test]
    fn test_display_format() {
        let event = Event::device_manager_with_level(
            "Removed cam1".to_string(),
            EventType::Success,
            LogLevel::Info,
        );
        let rendered = event.to_string();
        assert!(rendered.starts_with("Success ["));
        assert!(rendered.ends_with("] Removed cam1"));
    }
}
