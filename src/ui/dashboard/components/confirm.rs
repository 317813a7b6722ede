//! Removal confirmation dialog

use super::super::state::{DashboardState, InputMode};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Draw the y/n dialog over the dashboard while a removal awaits confirmation.
pub fn render_confirm_dialog(f: &mut Frame, state: &DashboardState) {
    let InputMode::ConfirmRemoval { name } = &state.input_mode else {
        return;
    };

    let area = centered(f.area(), 50, 7);
    let dialog = Paragraph::new(vec![
        Line::from(format!("Remove device \"{}\"?", name)),
        Line::from(""),
        Line::styled("[Y] Yes    [any key] No", Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
    .block(
        Block::default()
            .title("CONFIRM")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::LightRed))
            .padding(Padding::horizontal(1)),
    );

    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}
