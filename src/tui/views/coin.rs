//! Coin flip screen

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calc::coin::CoinFace;
use crate::tui::app::App;

fn face_color(face: CoinFace) -> Color {
    match face {
        CoinFace::Heads => Color::Yellow,
        CoinFace::Tails => Color::Magenta,
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(area);

    let face = match app.coin.last() {
        Some(face) => Span::styled(
            face.label().to_uppercase(),
            Style::default()
                .fg(face_color(face))
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("Press Space to flip", Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(
        Paragraph::new(vec![Line::default(), Line::from(face)])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Coin ")),
        chunks[0],
    );

    let stats = app.coin.stats();
    let streak = app.coin.streak();
    let mut lines = vec![
        Line::from(format!(
            "Heads: {} ({:.1}%)   Tails: {} ({:.1}%)   Total: {}",
            stats.heads,
            stats.heads_percent(),
            stats.tails,
            stats.tails_percent(),
            stats.total
        )),
        Line::from(match (streak.face, streak.is_notable()) {
            (Some(face), true) => format!("Streak: {} × {}", streak.count, face),
            _ => "Streak: -".to_string(),
        }),
        Line::default(),
    ];

    let recent: Vec<Span> = app
        .coin
        .history()
        .iter()
        .map(|flip| {
            Span::styled(
                format!("{} ", &flip.face.label()[..1]),
                Style::default().fg(face_color(flip.face)),
            )
        })
        .collect();
    lines.push(Line::from(
        std::iter::once(Span::raw("Recent: "))
            .chain(recent)
            .collect::<Vec<_>>(),
    ));

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Stats ")),
        chunks[1],
    );
}
