//! TUI views
//!
//! One module per screen, plus the status bar and help overlay.

pub mod calculator;
pub mod coin;
pub mod help;
pub mod history;
pub mod programmer;
pub mod status_bar;

use ratatui::{
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use super::app::{App, Screen};
use super::layout::{toast_rect, AppLayout};
use super::widgets::NotificationWidget;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    let titles: Vec<Line> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("F{} {}", i + 1, s.title())))
        .collect();
    frame.render_widget(
        Tabs::new(titles)
            .select(app.screen.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL).title(" calcdeck ")),
        layout.tabs,
    );

    match app.screen {
        Screen::Calculator => calculator::render(frame, app, layout.main),
        Screen::Programmer => programmer::render(frame, app, layout.main),
        Screen::Coin => coin::render(frame, app, layout.main),
        Screen::History => history::render(frame, app, layout.main),
    }

    status_bar::render_command_line(frame, app, layout.command_line);
    status_bar::render(frame, app, layout.status_bar);

    if app.show_help {
        help::render(frame, layout.main);
    }

    if let Some(notification) = app.notifications.current() {
        frame.render_widget(
            NotificationWidget::new(notification),
            toast_rect(44, 4, layout.main),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::state::Action;
    use crate::config::settings::Settings;
    use crate::storage::Storage;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_calculator_screen_shows_display_and_history() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);
        app.apply_all(Action::parse_sequence("7 + 3 =").unwrap());

        let text = screen_text(&app);
        assert!(text.contains("F1 Calculator"));
        assert!(text.contains("7 + 3 = 10"));
        assert!(text.contains("guest"));
    }

    #[test]
    fn test_every_screen_renders() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);
        app.apply_all(Action::parse_sequence("10").unwrap());

        app.switch_screen(Screen::Programmer);
        assert!(screen_text(&app).contains("0b1010"));

        app.switch_screen(Screen::Coin);
        assert!(screen_text(&app).contains("Press Space to flip"));

        app.switch_screen(Screen::History);
        assert!(screen_text(&app).contains("calcdeck user login"));
    }

    #[test]
    fn test_help_and_command_line_render() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        app.show_help = true;
        assert!(screen_text(&app).contains("Command line"));

        app.show_help = false;
        app.enter_command_mode();
        app.command_input.push_str("sqrt");
        assert!(screen_text(&app).contains(":sqrt"));
    }
}
