//! Standard calculator screen

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::keybindings::{bindings_for, KeyContext};
use crate::tui::layout::CalculatorLayout;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = CalculatorLayout::new(area);

    render_display(frame, app, layout.display);

    let items: Vec<ListItem> = app
        .calculator
        .history()
        .iter()
        .map(|entry| ListItem::new(entry.to_string()))
        .collect();
    let history = if items.is_empty() {
        List::new([ListItem::new(Span::styled(
            "No calculations yet",
            Style::default().fg(Color::DarkGray),
        ))])
    } else {
        List::new(items)
    };
    frame.render_widget(
        history.block(Block::default().borders(Borders::ALL).title(" History ")),
        layout.history,
    );

    render_hints(frame, KeyContext::Keypad, layout.hints);
}

/// Equation line, display and memory indicator
pub(super) fn render_display(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.calculator.state();

    let mut title = format!(" {} ", state.base.label());
    if state.memory != 0.0 {
        title.push_str("[M] ");
    }

    let lines = vec![
        Line::from(Span::styled(
            state.equation.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            state.display.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Right).block(block),
        area,
    );
}

pub(super) fn render_hints(frame: &mut Frame, context: KeyContext, area: Rect) {
    let lines: Vec<Line> = bindings_for(context)
        .map(|b| {
            Line::from(vec![
                Span::styled(format!("{:<10}", b.keys), Style::default().fg(Color::Yellow)),
                Span::raw(b.description),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", context.title())),
        ),
        area,
    );
}
