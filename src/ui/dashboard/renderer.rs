//! Dashboard main renderer

use super::components::{confirm, devices, footer, form, header, logs, notification};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

/// Draw the whole dashboard from `state`.
pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    notification::render_notification(f, main_chunks[1], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main_chunks[2]);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(4)])
        .split(content_chunks[0]);

    devices::render_devices_panel(f, left_chunks[0], state);
    form::render_form_panel(f, left_chunks[1], state);
    logs::render_logs_panel(f, content_chunks[1], state);
    footer::render_footer(f, main_chunks[3], state);

    confirm::render_confirm_dialog(f, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::error_classifier::LogLevel;
    use crate::events::{Event, EventType, Update};
    use crate::snapshot::DeviceState;
    use crate::ui::app::UIConfig;
    use crate::ui::dashboard::state::{InputMode, NotificationKind};
    use crate::ui::dashboard::utils::get_state_color;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use std::time::{Duration, Instant};

    fn state() -> DashboardState {
        DashboardState::new(
            Environment::Local,
            Instant::now(),
            UIConfig::new(false, Duration::from_millis(500)),
        )
    }

    fn render_buffer(state: &DashboardState) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_lines(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn render_lines(state: &DashboardState) -> Vec<String> {
        buffer_lines(&render_buffer(state))
    }

    fn find_line(lines: &[String], needle: &str) -> Option<usize> {
        lines.iter().position(|line| line.contains(needle))
    }

    /// Foreground color of the first cell of `needle` on the first row that
    /// contains both `row_marker` and `needle`.
    fn fg_of(buffer: &Buffer, row_marker: &str, needle: &str) -> Color {
        let lines = buffer_lines(buffer);
        let y = lines
            .iter()
            .position(|line| line.contains(row_marker) && line.contains(needle))
            .unwrap_or_else(|| panic!("no row with {} and {}", row_marker, needle));
        let byte = lines[y].find(needle).unwrap();
        let x = lines[y][..byte].chars().count();
        buffer[(x as u16, y as u16)].fg
    }

    fn apply_example(state: &mut DashboardState) {
        let snapshot = serde_json::from_str(
            r#"{"output_status": true, "device_list": {
                "Router": {"status": true, "ip": "192.168.1.1"},
                "Cam1": {"status": false},
                "NewCam": {}
            }}"#,
        )
        .unwrap();
        state.add_event(
            Event::status_poller_with_level(
                "Connected to http://localhost:5000".to_string(),
                EventType::Success,
                LogLevel::Info,
            )
            .with_update(Update::Snapshot { seq: 1, snapshot }),
        );
        state.update(Instant::now());
    }

    #[test]
    fn test_renders_indicator_and_cards_in_order() {
        let mut state = state();
        apply_example(&mut state);
        let lines = render_lines(&state);

        assert!(find_line(&lines, "Relay Status ON").is_some());

        let router = find_line(&lines, "Router").unwrap();
        let cam1 = find_line(&lines, "Cam1").unwrap();
        let new_cam = find_line(&lines, "NewCam").unwrap();
        assert!(router < cam1 && cam1 < new_cam);
        assert!(lines[router].contains("Online"));
        assert!(lines[router].contains("192.168.1.1"));
        assert!(lines[cam1].contains("Offline"));
        assert!(lines[new_cam].contains("Checking"));
    }

    #[test]
    fn test_renders_waiting_before_first_poll() {
        let lines = render_lines(&state());
        assert!(find_line(&lines, "Waiting for status...").is_some());
        assert!(find_line(&lines, "No devices monitored").is_some());
    }

    #[test]
    fn test_renders_notification_and_confirm_dialog() {
        let mut state = state();
        apply_example(&mut state);
        state.notify("Error: Invalid IP", NotificationKind::Error, Instant::now());
        state.input_mode = InputMode::ConfirmRemoval {
            name: "Cam1".to_string(),
        };
        let lines = render_lines(&state);

        assert!(find_line(&lines, "Error: Invalid IP").is_some());
        assert!(find_line(&lines, "Remove device \"Cam1\"?").is_some());
    }

    #[test]
    fn test_indicator_and_cards_are_styled_by_state() {
        let mut state = state();
        apply_example(&mut state);
        let buffer = render_buffer(&state);

        assert_eq!(
            fg_of(&buffer, "Relay Status ON", "Relay Status ON"),
            Color::LightGreen
        );
        assert_eq!(
            fg_of(&buffer, "Router", "Online"),
            get_state_color(DeviceState::Online)
        );
        assert_eq!(
            fg_of(&buffer, "Cam1", "Offline"),
            get_state_color(DeviceState::Offline)
        );
        assert_eq!(
            fg_of(&buffer, "NewCam", "Checking"),
            get_state_color(DeviceState::Checking)
        );
        assert_ne!(
            get_state_color(DeviceState::Online),
            get_state_color(DeviceState::Offline)
        );
    }

    #[test]
    fn test_failed_poll_keeps_cards_and_styles_indicator_as_error() {
        let mut state = state();
        apply_example(&mut state);
        state.add_event(
            Event::status_poller_with_level(
                "Error checking status: Malformed server response".to_string(),
                EventType::Error,
                LogLevel::Error,
            )
            .with_update(Update::PollFailed { seq: 2 }),
        );
        state.update(Instant::now());
        let buffer = render_buffer(&state);

        assert_eq!(
            fg_of(&buffer, "Error checking status", "Error checking status"),
            Color::Red
        );
        let lines = buffer_lines(&buffer);
        assert!(find_line(&lines, "Relay Status ON").is_none());
        assert!(find_line(&lines, "Router").is_some());
        assert!(find_line(&lines, "NewCam").is_some());
    }
}
