//! Status bar and command line

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, InputMode};

const HINTS: &str = " ?:Help  ::Command  Tab:Screen  q:Quit ";

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.calculator.state();
    let user = app
        .session
        .as_ref()
        .map(|s| s.username.as_str())
        .unwrap_or("guest");

    let mut spans = vec![
        Span::styled(format!(" {} ", user), Style::default().fg(Color::Green)),
        Span::raw("│ "),
        Span::styled(state.base.label(), Style::default().fg(Color::Cyan)),
        Span::raw(format!(" │ {} dp │ ", state.precision)),
    ];

    spans.push(match &app.rates {
        Some(table) => Span::raw(format!(
            "{} rates {}",
            table.base,
            table.fetched_at.format("%H:%M")
        )),
        None => Span::styled("no rates", Style::default().fg(Color::DarkGray)),
    });

    if !app.settings.keyboard_enabled {
        spans.push(Span::styled(" │ keypad off", Style::default().fg(Color::Yellow)));
    }

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize).saturating_sub(left_len + HINTS.len());
    spans.push(Span::raw(" ".repeat(padding.max(1))));
    spans.push(Span::styled(HINTS, Style::default().add_modifier(Modifier::DIM)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_command_line(frame: &mut Frame, app: &App, area: Rect) {
    if app.input_mode != InputMode::Command {
        return;
    }

    let text = format!(":{}", app.command_input);
    let cursor_x = area.x + (text.chars().count() as u16).min(area.width.saturating_sub(1));
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
        area,
    );
    frame.set_cursor_position((cursor_x, area.y));
}
