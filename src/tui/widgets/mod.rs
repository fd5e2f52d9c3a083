//! Reusable widgets for the TUI

pub mod notification;

pub use notification::{Notification, NotificationLevel, NotificationQueue, NotificationWidget};
