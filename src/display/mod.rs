//! Display formatting for terminal output
//!
//! Turns results and persisted records into text for the CLI and the TUI.

pub mod activity;
pub mod history;
pub mod number;
pub mod portfolio;
pub mod schedule;

pub use activity::{format_activity_list, format_activity_stats};
pub use history::{format_history, format_representations};
pub use number::{format_currency, format_exchange, format_grouped, format_significant};
pub use portfolio::{format_alerts, format_holdings, format_portfolio_stats, format_quote};
pub use schedule::{format_financial_result, format_schedule};
