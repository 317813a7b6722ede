//! Add-device form component

use super::super::state::{DashboardState, FormField, InputMode};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let value_style = if focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("{:<6}", label), Style::default().fg(Color::Cyan)),
        Span::styled(value, value_style),
        Span::styled(cursor, Style::default().fg(Color::White)),
    ])
}

fn form_block(border_color: Color) -> Block<'static> {
    Block::default()
        .title("ADD DEVICE")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .padding(Padding::horizontal(1))
}

/// Render the add-device form; it is highlighted while it has keyboard focus.
pub fn render_form_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let editing = state.input_mode == InputMode::EditingForm;
    let border_color = if editing { Color::Yellow } else { Color::Cyan };

    if !editing && state.form.is_empty() {
        let hint = Paragraph::new(Line::styled(
            "Press [A] to add a device",
            Style::default().fg(Color::DarkGray),
        ))
        .block(form_block(border_color));
        f.render_widget(hint, area);
        return;
    }

    let lines = vec![
        field_line(
            "Name",
            &state.form.name,
            editing && state.form.focus == FormField::Name,
        ),
        field_line(
            "IP",
            &state.form.ip,
            editing && state.form.focus == FormField::Ip,
        ),
    ];

    let form = Paragraph::new(lines).block(form_block(border_color));
    f.render_widget(form, area);
}
