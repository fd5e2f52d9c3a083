//! Help overlay listing every keybinding

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::keybindings::{bindings_for, KeyContext};
use crate::tui::layout::centered_rect;

pub fn render(frame: &mut Frame, area: Rect) {
    let area = centered_rect(70, 80, area);

    let mut lines = Vec::new();
    for context in [
        KeyContext::Global,
        KeyContext::Keypad,
        KeyContext::Coin,
        KeyContext::CommandLine,
    ] {
        lines.push(Line::from(Span::styled(
            context.title(),
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )));
        for binding in bindings_for(context) {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<38}", binding.keys), Style::default().fg(Color::Yellow)),
                Span::raw(binding.description),
            ]));
        }
        lines.push(Line::default());
    }

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help (any key closes) "),
        ),
        area,
    );
}
