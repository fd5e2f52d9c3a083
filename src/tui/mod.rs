//! Terminal User Interface module
//!
//! A ratatui front end over the same calculator state machine the CLI uses:
//! a keypad calculator, the programmer all-radix view, the coin flipper and
//! the logged-in user's saved history.

pub mod app;
pub mod event;
pub mod handler;
pub mod keybindings;
pub mod layout;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
