//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from events

use super::state::{DashboardState, DeviceCard, InputMode, NotificationKind};

use crate::events::{Event as WorkerEvent, Update};
use crate::snapshot::{RelayIndicator, StatusSnapshot};

use std::time::Instant;

impl DashboardState {
    /// Apply queued events and expire the notification.
    pub fn update(&mut self, now: Instant) {
        self.tick += 1;

        // Process all queued events one by one
        while let Some(event) = self.pending_events.pop_front() {
            if event.should_display() {
                self.add_to_activity_log(event.log_entry());
            }
            self.process_event(event, now);
        }

        if self
            .notification
            .as_ref()
            .is_some_and(|notification| notification.is_expired(now))
        {
            self.notification = None;
        }
    }

    /// Process a single event and update relevant state
    fn process_event(&mut self, event: WorkerEvent, now: Instant) {
        let Some(update) = event.update else {
            return;
        };

        match update {
            Update::Snapshot { seq, snapshot } => {
                if self.accept_poll(seq) {
                    self.apply_snapshot(snapshot);
                }
            }
            Update::PollFailed { seq } => {
                // The device list keeps its last rendered state.
                if self.accept_poll(seq) {
                    self.indicator = RelayIndicator::Error;
                }
            }
            Update::DeviceAdded { name, message } => {
                let text =
                    message.unwrap_or_else(|| format!("Device \"{}\" added successfully", name));
                self.notify(text, NotificationKind::Success, now);
                self.form.clear();
                if self.input_mode == InputMode::EditingForm {
                    self.input_mode = InputMode::Normal;
                }
            }
            Update::DeviceRemoved { name, message } => {
                let text =
                    message.unwrap_or_else(|| format!("Device \"{}\" removed successfully", name));
                self.notify(text, NotificationKind::Success, now);
            }
            Update::AddFailed { error, .. } | Update::RemoveFailed { error, .. } => {
                self.notify(format!("Error: {}", error), NotificationKind::Error, now);
            }
        }
    }

    /// Accept a poll outcome only if it is newer than the last one applied.
    fn accept_poll(&mut self, seq: u64) -> bool {
        if seq <= self.last_applied_seq() {
            return false;
        }
        self.set_last_applied_seq(seq);
        true
    }

    /// Replace the rendered device list with the snapshot's.
    fn apply_snapshot(&mut self, snapshot: StatusSnapshot) {
        self.indicator = snapshot.relay_indicator();
        self.snapshot_timestamp = snapshot.timestamp;
        self.devices = snapshot
            .device_list
            .iter()
            .map(|(name, info)| DeviceCard::new(name, info))
            .collect();

        if self.selected >= self.devices.len() {
            self.selected = self.devices.len().saturating_sub(1);
        }
    }
}
