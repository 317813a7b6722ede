//! Transient notification banner

use super::super::state::{DashboardState, NotificationKind};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;

pub fn render_notification(f: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(notification) = &state.notification else {
        return;
    };

    let color = match notification.kind {
        NotificationKind::Success => Color::LightGreen,
        NotificationKind::Error => Color::LightRed,
    };
    let banner = Paragraph::new(notification.text.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    f.render_widget(banner, area);
}
