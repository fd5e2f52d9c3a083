//! Event handler for the TUI
//!
//! Routes keyboard events to the keypad, the coin screen or the command
//! line depending on the current input mode.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::calc::radix::Radix;
use crate::calc::state::Action;
use crate::error::{CalcError, CalcResult};

use super::app::{App, InputMode, Screen};
use super::event::Event;
use super::keybindings::{resolve, KeyAction};
use super::widgets::Notification;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> CalcResult<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => app.on_tick(Instant::now()),
        Event::Resize(_, _) => {}
    }
    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Command => handle_command_key(app, key),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    let Some(action) = resolve(key, app.screen, app.settings.keyboard_enabled) else {
        return;
    };

    match action {
        KeyAction::Calc(action) => {
            app.apply(action);
        }
        KeyAction::FlipCoin => {
            app.flip_coin();
        }
        KeyAction::ResetCoin => app.reset_coin(),
        KeyAction::NextScreen => app.switch_screen(app.screen.next()),
        KeyAction::PreviousScreen => app.switch_screen(app.screen.previous()),
        KeyAction::Screen(screen) => app.switch_screen(screen),
        KeyAction::OpenCommandLine => app.enter_command_mode(),
        KeyAction::ToggleHelp => app.show_help = true,
        KeyAction::Quit => app.quit(),
    }
}

/// Keys typed while the command line has focus
fn handle_command_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.exit_command_mode();
        return;
    }

    match key.code {
        KeyCode::Esc => app.exit_command_mode(),
        KeyCode::Enter => {
            let line = std::mem::take(&mut app.command_input);
            app.exit_command_mode();
            if let Err(e) = run_command(app, &line) {
                app.notify(Notification::error(e.to_string()));
            }
        }
        KeyCode::Backspace => {
            if app.command_input.pop().is_none() {
                app.exit_command_mode();
            }
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
}

/// Execute one command-line entry
///
/// Anything that is not a named command is read as a key sequence.
pub fn run_command(app: &mut App, line: &str) -> CalcResult<()> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = words.first() else {
        return Ok(());
    };

    match (first.to_lowercase().as_str(), &words[1..]) {
        ("q" | "quit", []) => app.quit(),
        ("help", []) => app.show_help = true,
        ("flip", []) => {
            app.switch_screen(Screen::Coin);
            app.flip_coin();
        }
        ("refresh", []) => app.refresh_rates(),
        ("bin" | "oct" | "dec" | "hex", []) => {
            let radix = match first.to_lowercase().as_str() {
                "bin" => Radix::Binary,
                "oct" => Radix::Octal,
                "hex" => Radix::Hexadecimal,
                _ => Radix::Decimal,
            };
            app.apply(Action::SetBase(radix));
        }
        ("base", [value]) => {
            let radix = value
                .parse::<u32>()
                .map_err(|_| CalcError::Validation(format!("Invalid base: '{}'", value)))
                .and_then(Radix::from_value)?;
            app.apply(Action::SetBase(radix));
        }
        ("fx", [amount, code]) => {
            let amount: f64 = amount
                .parse()
                .map_err(|_| CalcError::Validation(format!("Invalid amount: '{}'", amount)))?;
            let converted = app.exchange(amount, code)?;
            let base = app.rates.as_ref().map(|t| t.base.clone()).unwrap_or_default();
            app.notify(Notification::info(format!(
                "{} {} = {:.2} {}",
                amount,
                base,
                converted,
                code.to_uppercase()
            )));
        }
        _ => {
            let actions = Action::parse_sequence(line)?;
            app.apply_all(actions);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use crate::storage::Storage;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_keypad_drives_calculator() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        type_str(&mut app, "12+3");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.calculator.display(), "15");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.calculator.display(), "0");
    }

    #[test]
    fn test_command_line_suppresses_keypad() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        press(&mut app, KeyCode::Char(':'));
        assert_eq!(app.input_mode, InputMode::Command);
        type_str(&mut app, "9 sqrt");
        assert_eq!(app.calculator.display(), "0");
        assert_eq!(app.command_input, "9 sqrt");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.calculator.display(), "3");
    }

    #[test]
    fn test_escape_leaves_command_line_without_clearing() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        type_str(&mut app, "42");
        press(&mut app, KeyCode::Char(':'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.calculator.display(), "42");
    }

    #[test]
    fn test_radix_commands() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        run_command(&mut app, "255").unwrap();
        run_command(&mut app, "hex").unwrap();
        assert_eq!(app.calculator.display(), "FF");
        assert_eq!(app.calculator.state().base, Radix::Hexadecimal);

        run_command(&mut app, "base 2").unwrap();
        assert_eq!(app.calculator.display(), "11111111");

        assert!(run_command(&mut app, "base 7").unwrap_err().is_validation());
    }

    #[test]
    fn test_unknown_command_is_an_error() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        press(&mut app, KeyCode::Char(':'));
        type_str(&mut app, "frobnicate");
        press(&mut app, KeyCode::Enter);
        assert!(app.notifications.current().unwrap().message.contains("frobnicate"));
    }

    #[test]
    fn test_space_flips_on_coin_screen() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        press(&mut app, KeyCode::F(3));
        assert_eq!(app.screen, Screen::Coin);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.coin.stats().total, 2);
        assert_eq!(app.calculator.display(), "0");
    }

    #[test]
    fn test_help_overlay_swallows_next_key() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_fx_without_rates_fails() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        assert!(run_command(&mut app, "fx 10 EUR").is_err());
    }
}
