//! Saved history and recent activity of the logged-in user

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::display::{format_activity_list, format_history};
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(session) = &app.session else {
        frame.render_widget(
            Paragraph::new("Log in with `calcdeck user login <name>` to keep history.")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" History ")),
            area,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let history_text = match app.saved_history() {
        Ok(entries) => format_history(&entries),
        Err(e) => e.to_string(),
    };
    frame.render_widget(
        list_of(&history_text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {}'s calculations ", session.username)),
        ),
        chunks[0],
    );

    let activity_text = match app.recent_activity() {
        Ok(entries) => format_activity_list(&entries, Utc::now()),
        Err(e) => e.to_string(),
    };
    frame.render_widget(
        list_of(&activity_text)
            .block(Block::default().borders(Borders::ALL).title(" Recent activity ")),
        chunks[1],
    );
}

fn list_of(text: &str) -> List<'_> {
    List::new(text.lines().map(ListItem::new).collect::<Vec<_>>())
}
