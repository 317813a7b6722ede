//! Device list component

use super::super::state::DashboardState;
use super::super::utils::get_state_color;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Padding};

/// Render one card per device, in the order the backend sent them.
pub fn render_devices_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(format!("DEVICES ({})", state.devices.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    if state.devices.is_empty() {
        let empty = List::new([ListItem::new(Line::styled(
            "No devices monitored",
            Style::default().fg(Color::DarkGray),
        ))])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .devices
        .iter()
        .map(|card| {
            let color = get_state_color(card.state);
            let mut spans = vec![
                Span::styled("● ", Style::default().fg(color)),
                Span::styled(
                    card.name.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(card.state.to_string(), Style::default().fg(color)),
            ];
            if let Some(ip) = &card.ip {
                spans.push(Span::styled(
                    format!("  {}", ip),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            if let Some(last_online) = &card.last_online {
                spans.push(Span::styled(
                    format!("  last seen {}", last_online),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 48, 60)))
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(state.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}
