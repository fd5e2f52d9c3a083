//! calcdeck - a terminal multi-mode calculator
//!
//! Standard, scientific and programmer calculation share one state machine;
//! financial, date, unit and currency tools sit beside it, along with a coin
//! flipper and a small investment tracker for logged-in users.
//!
//! # Architecture
//!
//! - `calc`: pure calculation engines (no I/O)
//! - `config`: path resolution and user settings
//! - `error`: the crate-wide error type
//! - `models`: persisted records (users, activities, history, holdings)
//! - `storage`: key-value persistence and repositories
//! - `services`: business logic over storage, plus rate and quote sources
//! - `crypto`: password hashing and secret handling
//! - `display`: text formatting for CLI output
//! - `cli`: clap command handlers
//! - `tui`: the interactive ratatui interface
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use calcdeck::calc::{Action, Calculator};
//!
//! let mut calc = Calculator::new(10);
//! calc.apply_all(Action::parse_sequence("7 + 3 =")?)?;
//! assert_eq!(calc.display(), "10");
//! ```

pub mod calc;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{CalcError, CalcResult};
