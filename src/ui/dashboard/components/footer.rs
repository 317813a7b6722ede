//! Dashboard footer component
//!
//! Renders the key bindings for the current input mode

use super::super::state::{DashboardState, InputMode};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn footer_text(mode: &InputMode) -> &'static str {
    match mode {
        InputMode::Normal => {
            "[Q] Quit | [↑↓] Select | [A] Add | [D] Remove | [R] Refresh | [X] Dismiss"
        }
        InputMode::EditingForm => "[Tab] Next field | [Enter] Add device | [Esc] Back",
        InputMode::ConfirmRemoval { .. } => "[Y] Confirm removal | any other key cancels",
    }
}

/// Render enhanced footer.
pub fn render_footer(f: &mut Frame, area: Rect, state: &DashboardState) {
    let footer = Paragraph::new(footer_text(&state.input_mode))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
