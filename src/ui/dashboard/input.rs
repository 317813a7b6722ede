//! Keyboard handling for the dashboard
//!
//! Keys only mutate view state; anything that needs the network is returned
//! as a [`UiAction`] for the app loop to dispatch.

use super::state::{DashboardState, InputMode, NotificationKind};
use crate::workers::device_manager::{DeviceCommand, validate_new_device};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Side effects requested by a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Quit,
    Refresh,
    Send(DeviceCommand),
}

impl DashboardState {
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<UiAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(UiAction::Quit);
        }

        match self.input_mode.clone() {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::EditingForm => self.handle_form_key(key, now),
            InputMode::ConfirmRemoval { name } => self.handle_confirm_key(key, name),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(UiAction::Quit),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.devices.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('a') => {
                self.input_mode = InputMode::EditingForm;
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(device) = self.selected_device() {
                    self.input_mode = InputMode::ConfirmRemoval {
                        name: device.name.clone(),
                    };
                }
                None
            }
            KeyCode::Char('r') => Some(UiAction::Refresh),
            KeyCode::Char('x') => {
                self.dismiss_notification();
                None
            }
            _ => None,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent, now: Instant) -> Option<UiAction> {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                None
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.form.toggle_focus();
                None
            }
            KeyCode::Backspace => {
                self.form.focused_mut().pop();
                None
            }
            KeyCode::Enter => match validate_new_device(&self.form.name, &self.form.ip) {
                // The form is cleared only once the backend accepts the device.
                Ok((name, ip)) => Some(UiAction::Send(DeviceCommand::Add { name, ip })),
                Err(message) => {
                    self.notify(format!("Error: {}", message), NotificationKind::Error, now);
                    None
                }
            },
            KeyCode::Char(c) => {
                self.form.focused_mut().push(c);
                None
            }
            _ => None,
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, name: String) -> Option<UiAction> {
        self.input_mode = InputMode::Normal;
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                Some(UiAction::Send(DeviceCommand::Remove { name }))
            }
            _ => None,
        }
    }
}
