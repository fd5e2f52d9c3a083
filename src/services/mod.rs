//! Service layer for calcdeck
//!
//! Business logic on top of the storage layer: users and sessions, the
//! activity log, persisted history, the investment tracker, and the
//! external rate/quote collaborators.

pub mod activity;
pub mod auth;
pub mod history;
pub mod portfolio;
pub mod quotes;
pub mod rates;

pub use activity::ActivityService;
pub use auth::AuthService;
pub use history::HistoryService;
pub use portfolio::PortfolioService;
pub use quotes::{fetch_sequenced, FileQuoteSource, QuoteSource, StaticQuoteSource};
pub use rates::{FileRateSource, RatePoller, RateSource, RateUpdate, StaticRateSource};
