//! Programmer screen: the display plus its value in every radix

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::tui::app::App;
use crate::tui::keybindings::KeyContext;
use crate::tui::layout::CalculatorLayout;

use super::calculator::{render_display, render_hints};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = CalculatorLayout::new(area);
    render_display(frame, app, layout.display);

    let block = Block::default().borders(Borders::ALL).title(" All bases ");
    match app.representations() {
        Ok(reps) => {
            let active = app.calculator.state().base;
            let rows = reps.into_iter().map(|(radix, text)| {
                let style = if radix == active {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(vec![Cell::from(radix.label()), Cell::from(text)]).style(style)
            });
            let table =
                Table::new(rows, [Constraint::Length(12), Constraint::Min(10)]).block(block);
            frame.render_widget(table, layout.history);
        }
        Err(e) => {
            frame.render_widget(
                Paragraph::new(e.to_string())
                    .style(Style::default().fg(Color::Red))
                    .block(block),
                layout.history,
            );
        }
    }

    render_hints(frame, KeyContext::CommandLine, layout.hints);
}
