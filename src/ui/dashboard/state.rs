//! Dashboard state management
//!
//! The whole screen is a function of this struct. Workers never touch it;
//! their events are queued and applied by the UI loop.

use crate::consts::cli_consts::{MAX_ACTIVITY_LOGS, notification};
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::snapshot::{DeviceInfo, DeviceState, RelayIndicator};
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::Instant;

/// One rendered device entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCard {
    pub name: String,
    pub state: DeviceState,
    pub ip: Option<String>,
    pub last_online: Option<String>,
}

impl DeviceCard {
    pub fn new(name: &str, info: &DeviceInfo) -> Self {
        Self {
            name: name.to_string(),
            state: info.state(),
            ip: info.ip.clone(),
            last_online: info.last_online.clone(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message with its own dismissal deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Ip,
}

/// The add-device form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddDeviceForm {
    pub name: String,
    pub ip: String,
    pub focus: FormField,
}

impl AddDeviceForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.ip.is_empty()
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Ip => &mut self.ip,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Ip,
            FormField::Ip => FormField::Name,
        };
    }
}

/// What keyboard input currently drives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    EditingForm,
    ConfirmRemoval { name: String },
}

/// Dashboard view state.
#[derive(Debug)]
pub struct DashboardState {
    /// The backend being monitored.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Poll interval shown in the header.
    pub poll_interval_ms: u64,

    /// Overall relay indicator.
    pub indicator: RelayIndicator,
    /// Device cards in backend order.
    pub devices: Vec<DeviceCard>,
    /// Backend timestamp of the rendered snapshot.
    pub snapshot_timestamp: Option<f64>,
    /// Index of the selected card.
    pub selected: usize,

    pub form: AddDeviceForm,
    pub input_mode: InputMode,
    pub notification: Option<Notification>,

    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Animation tick counter
    pub tick: usize,

    /// Sequence number of the newest poll outcome applied so far.
    last_applied_seq: u64,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(environment: Environment, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            environment,
            start_time,
            with_background_color: ui_config.with_background_color,
            poll_interval_ms: ui_config.poll_interval.as_millis() as u64,
            indicator: RelayIndicator::default(),
            devices: Vec::new(),
            snapshot_timestamp: None,
            selected: 0,
            form: AddDeviceForm::default(),
            input_mode: InputMode::Normal,
            notification: None,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            tick: 0,
            last_applied_seq: 0,
        }
    }

    pub fn last_applied_seq(&self) -> u64 {
        self.last_applied_seq
    }

    pub fn set_last_applied_seq(&mut self, seq: u64) {
        self.last_applied_seq = seq;
    }

    pub fn selected_device(&self) -> Option<&DeviceCard> {
        self.devices.get(self.selected)
    }

    /// Show a notification, replacing the current one and its deadline.
    pub fn notify(&mut self, text: impl Into<String>, kind: NotificationKind, now: Instant) {
        self.notification = Some(Notification {
            text: text.into(),
            kind,
            expires_at: now + notification::ttl(),
        });
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }
}
