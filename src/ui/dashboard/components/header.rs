//! Dashboard header component
//!
//! Renders the title and the relay indicator

use super::super::state::DashboardState;
use super::super::utils::{format_backend_timestamp, format_uptime};
use crate::snapshot::RelayIndicator;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render the title bar and the relay status line.
pub fn render_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title = Paragraph::new(format!(
        "NETWORK MONITOR v{}",
        env!("CARGO_PKG_VERSION")
    ))
    .alignment(Alignment::Center)
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick),
    );
    f.render_widget(title, header_chunks[0]);

    let indicator_color = match state.indicator {
        indicator if indicator.is_online_style() => Color::LightGreen,
        RelayIndicator::Error => Color::Red,
        RelayIndicator::Unknown => Color::Gray,
        _ => Color::LightRed,
    };

    let mut spans = vec![
        Span::styled(
            state.indicator.text(),
            Style::default()
                .fg(indicator_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  |  {}", state.environment.server_url()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "  |  every {}ms  |  up {}",
                state.poll_interval_ms,
                format_uptime(state.start_time.elapsed().as_secs())
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(updated) = state.snapshot_timestamp.and_then(format_backend_timestamp) {
        spans.push(Span::styled(
            format!("  |  last update {}", updated),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let status = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(status, header_chunks[1]);
}
