//! Terminal setup and teardown
//!
//! Initializes raw mode and the alternate screen, installs a panic hook that
//! restores the terminal, and runs the event loop.

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use crate::config::paths::CalcPaths;
use crate::config::settings::Settings;
use crate::error::{CalcError, CalcResult};
use crate::services::{FileRateSource, RatePoller};
use crate::storage::Storage;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

fn tui_error(e: io::Error) -> CalcError {
    CalcError::Tui(e.to_string())
}

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> CalcResult<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode().map_err(tui_error)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(tui_error)?;

    Terminal::new(CrosstermBackend::new(stdout)).map_err(tui_error)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> CalcResult<()> {
    disable_raw_mode().map_err(tui_error)?;
    execute!(io::stdout(), LeaveAlternateScreen).map_err(tui_error)?;
    Ok(())
}

/// Start background rate refreshes when a snapshot file is present
fn spawn_rate_poller(paths: &CalcPaths, settings: &Settings) -> Option<RatePoller> {
    let rates_file = paths.rates_file();
    if !rates_file.exists() {
        tracing::debug!(path = %rates_file.display(), "no rate snapshot; poller not started");
        return None;
    }

    Some(RatePoller::spawn(
        Arc::new(FileRateSource::new(rates_file)),
        settings.exchange.base_currency.clone(),
        Duration::from_secs(settings.exchange.refresh_interval_secs),
        Duration::from_millis(settings.exchange.debounce_ms),
    ))
}

/// Run the TUI application
pub fn run_tui(storage: &Storage, settings: &Settings, paths: &CalcPaths) -> CalcResult<()> {
    let mut terminal = init_terminal()?;

    let mut app = App::new(storage, settings);
    if let Some(poller) = spawn_rate_poller(paths, settings) {
        app = app.with_rate_poller(poller);
    }

    let events = EventHandler::default();
    let result = (|| -> CalcResult<()> {
        while !app.should_quit {
            terminal
                .draw(|frame| super::views::render(frame, &app))
                .map_err(tui_error)?;
            handle_event(&mut app, events.next()?)?;
        }
        Ok(())
    })();

    // The poller stops when the app drops; restore the screen either way
    drop(app);
    restore_terminal()?;
    result
}
