//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the calculators and services.

pub mod activity;
pub mod calc;
pub mod coin;
pub mod convert;
pub mod date;
pub mod exchange;
pub mod finance;
pub mod portfolio;
pub mod user;

pub use activity::{
    handle_activity_command, handle_history_command, ActivityCommands, HistoryCommands,
};
pub use calc::{handle_base_command, handle_calc_command, BaseCommands, CalcArgs};
pub use coin::{handle_coin_command, CoinArgs};
pub use convert::{handle_convert_command, handle_units_command, ConvertArgs};
pub use date::{handle_date_command, DateCommands};
pub use exchange::{handle_exchange_command, ExchangeCommands};
pub use finance::{handle_finance_command, FinanceArgs};
pub use portfolio::{
    handle_alert_command, handle_favorite_command, handle_portfolio_command, AlertCommands,
    FavoriteCommands, PortfolioCommands,
};
pub use user::{handle_user_command, UserCommands};
