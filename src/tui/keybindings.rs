//! Keybinding definitions
//!
//! Maps key presses to actions per screen, and lists the bindings for the
//! help overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::calc::arithmetic::Operator;
use crate::calc::state::Action;

use super::app::Screen;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Calc(Action),
    FlipCoin,
    ResetCoin,
    NextScreen,
    PreviousScreen,
    Screen(Screen),
    OpenCommandLine,
    ToggleHelp,
    Quit,
}

/// Context in which a keybinding is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Global,
    /// Calculator and programmer screens
    Keypad,
    Coin,
    CommandLine,
}

impl KeyContext {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Keypad => "Keypad",
            Self::Coin => "Coin flip",
            Self::CommandLine => "Command line",
        }
    }
}

/// A keybinding definition for the help overlay
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub keys: &'static str,
    pub description: &'static str,
    pub context: KeyContext,
}

const fn bind(keys: &'static str, description: &'static str, context: KeyContext) -> Keybinding {
    Keybinding {
        keys,
        description,
        context,
    }
}

/// All keybindings
pub static KEYBINDINGS: &[Keybinding] = &[
    bind("q / Ctrl-C", "Quit", KeyContext::Global),
    bind("Tab / Shift-Tab", "Next / previous screen", KeyContext::Global),
    bind("F1-F4", "Jump to screen", KeyContext::Global),
    bind(":", "Command line", KeyContext::Global),
    bind("?", "Toggle help", KeyContext::Global),
    bind("0-9 .", "Enter digits", KeyContext::Keypad),
    bind("a-f", "Hex digits (programmer screen)", KeyContext::Keypad),
    bind("+ - * / ^", "Operators", KeyContext::Keypad),
    bind("Enter / =", "Evaluate", KeyContext::Keypad),
    bind("%", "Percent", KeyContext::Keypad),
    bind("Esc", "Clear", KeyContext::Keypad),
    bind("Space", "Flip the coin", KeyContext::Coin),
    bind("r", "Reset stats", KeyContext::Coin),
    bind("sqrt sin cos tan log ln square cube", "Scientific functions", KeyContext::CommandLine),
    bind("mc mr m+ m-", "Memory", KeyContext::CommandLine),
    bind("bin oct dec hex", "Switch radix", KeyContext::CommandLine),
    bind("not lsh rsh", "Bitwise operation (32-bit)", KeyContext::CommandLine),
    bind("pow root", "Power and root operators", KeyContext::CommandLine),
    bind("fx <amount> <code>", "Convert currency", KeyContext::CommandLine),
    bind("refresh", "Refresh exchange rates", KeyContext::CommandLine),
    bind("<keys>", "Any key sequence, e.g. 12 * 3 =", KeyContext::CommandLine),
];

/// Bindings shown for a context
pub fn bindings_for(context: KeyContext) -> impl Iterator<Item = &'static Keybinding> {
    KEYBINDINGS.iter().filter(move |b| b.context == context)
}

/// Resolve a key press in normal mode
///
/// `keypad_enabled` turns the calculator key mapping off without touching
/// navigation. The command line handles its own keys and never calls this.
pub fn resolve(key: KeyEvent, screen: Screen, keypad_enabled: bool) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(KeyAction::Quit),
            _ => None,
        };
    }

    let global = match key.code {
        KeyCode::Char('q') => Some(KeyAction::Quit),
        KeyCode::Tab => Some(KeyAction::NextScreen),
        KeyCode::BackTab => Some(KeyAction::PreviousScreen),
        KeyCode::Char(':') => Some(KeyAction::OpenCommandLine),
        KeyCode::Char('?') => Some(KeyAction::ToggleHelp),
        KeyCode::F(n @ 1..=4) => Some(KeyAction::Screen(Screen::ALL[usize::from(n) - 1])),
        _ => None,
    };
    if global.is_some() {
        return global;
    }

    match screen {
        Screen::Coin => match key.code {
            KeyCode::Char(' ') => Some(KeyAction::FlipCoin),
            KeyCode::Char('r') => Some(KeyAction::ResetCoin),
            _ => None,
        },
        Screen::Calculator | Screen::Programmer if keypad_enabled => {
            keypad_action(key.code, screen == Screen::Programmer).map(KeyAction::Calc)
        }
        _ => None,
    }
}

fn keypad_action(code: KeyCode, hex_letters: bool) -> Option<Action> {
    match code {
        KeyCode::Char(c @ '0'..='9') => Some(Action::Digit(c)),
        KeyCode::Char(c @ ('a'..='f' | 'A'..='F')) if hex_letters => Some(Action::Digit(c)),
        KeyCode::Char('.') => Some(Action::Decimal),
        KeyCode::Char('+') => Some(Action::Operator(Operator::Add)),
        KeyCode::Char('-') => Some(Action::Operator(Operator::Subtract)),
        KeyCode::Char('*') => Some(Action::Operator(Operator::Multiply)),
        KeyCode::Char('/') => Some(Action::Operator(Operator::Divide)),
        KeyCode::Char('^') => Some(Action::Operator(Operator::Power)),
        KeyCode::Char('%') => Some(Action::Percent),
        KeyCode::Enter | KeyCode::Char('=') => Some(Action::Equals),
        KeyCode::Esc => Some(Action::Clear),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keypad_keys() {
        let s = Screen::Calculator;
        assert_eq!(
            resolve(press(KeyCode::Char('7')), s, true),
            Some(KeyAction::Calc(Action::Digit('7')))
        );
        assert_eq!(
            resolve(press(KeyCode::Char('*')), s, true),
            Some(KeyAction::Calc(Action::Operator(Operator::Multiply)))
        );
        assert_eq!(resolve(press(KeyCode::Enter), s, true), Some(KeyAction::Calc(Action::Equals)));
        assert_eq!(
            resolve(press(KeyCode::Char('=')), s, true),
            Some(KeyAction::Calc(Action::Equals))
        );
        assert_eq!(resolve(press(KeyCode::Esc), s, true), Some(KeyAction::Calc(Action::Clear)));
    }

    #[test]
    fn test_hex_letters_only_on_programmer_screen() {
        let key = press(KeyCode::Char('b'));
        assert_eq!(resolve(key, Screen::Calculator, true), None);
        assert_eq!(
            resolve(key, Screen::Programmer, true),
            Some(KeyAction::Calc(Action::Digit('b')))
        );
    }

    #[test]
    fn test_keypad_disabled_keeps_navigation() {
        assert_eq!(resolve(press(KeyCode::Char('7')), Screen::Calculator, false), None);
        assert_eq!(
            resolve(press(KeyCode::Tab), Screen::Calculator, false),
            Some(KeyAction::NextScreen)
        );
    }

    #[test]
    fn test_space_flips_only_on_coin_screen() {
        assert_eq!(
            resolve(press(KeyCode::Char(' ')), Screen::Coin, true),
            Some(KeyAction::FlipCoin)
        );
        assert_eq!(resolve(press(KeyCode::Char(' ')), Screen::Calculator, true), None);
        assert_eq!(resolve(press(KeyCode::Char('7')), Screen::Coin, true), None);
    }

    #[test]
    fn test_global_keys() {
        assert_eq!(
            resolve(press(KeyCode::F(3)), Screen::Calculator, true),
            Some(KeyAction::Screen(Screen::Coin))
        );
        assert_eq!(
            resolve(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Screen::Coin, true),
            Some(KeyAction::Quit)
        );
        assert_eq!(resolve(press(KeyCode::F(9)), Screen::Coin, true), None);
    }

    #[test]
    fn test_every_context_has_bindings() {
        for ctx in [
            KeyContext::Global,
            KeyContext::Keypad,
            KeyContext::Coin,
            KeyContext::CommandLine,
        ] {
            assert!(bindings_for(ctx).count() > 0, "{}", ctx.title());
        }
    }
}
