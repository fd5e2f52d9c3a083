//! Core data models for calcdeck
//!
//! Records that outlive a single keypress: calculation history, the activity
//! log, users and sessions, and investment-tracker holdings and alerts.

pub mod activity;
pub mod history;
pub mod ids;
pub mod portfolio;
pub mod user;

pub use activity::{Activity, ActivityGlyph, ActivityKind, ActivityStats};
pub use history::{BoundedLog, HistoryEntry};
pub use ids::{ActivityId, AlertId, HoldingId, UserId};
pub use portfolio::{AlertDirection, AssetKind, Holding, PortfolioStats, PriceAlert, Quote};
pub use user::{Session, User};
