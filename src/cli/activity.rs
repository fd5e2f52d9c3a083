//! Activity log and persisted history CLI commands
//!
//! Both need a logged-in user.

use chrono::Utc;
use clap::Subcommand;

use crate::display::{format_activity_list, format_activity_stats, format_history};
use crate::error::CalcResult;
use crate::services::activity::RECENT_LIMIT;
use crate::services::{ActivityService, AuthService, HistoryService};
use crate::storage::Storage;

/// Activity subcommands
#[derive(Subcommand)]
pub enum ActivityCommands {
    /// List your activity, newest first
    List {
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// The last few entries
    Recent,
    /// Counts for the last day, week and month
    Stats,
    /// Delete your activity entries
    Clear,
}

/// Handle an activity command
pub fn handle_activity_command(storage: &Storage, cmd: ActivityCommands) -> CalcResult<()> {
    let session = AuthService::new(storage).require()?;
    let service = ActivityService::new(storage);
    let now = Utc::now();

    match cmd {
        ActivityCommands::List { limit } => {
            let entries = service.recent(session.user_id, limit)?;
            println!("{}", format_activity_list(&entries, now));
        }
        ActivityCommands::Recent => {
            let entries = service.recent(session.user_id, RECENT_LIMIT)?;
            println!("{}", format_activity_list(&entries, now));
        }
        ActivityCommands::Stats => {
            println!("{}", format_activity_stats(&service.stats(session.user_id, now)?));
        }
        ActivityCommands::Clear => {
            let removed = service.clear(session.user_id)?;
            println!("Removed {} activity entries", removed);
        }
    }
    Ok(())
}

/// History subcommands
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Show saved calculations, newest first
    List {
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
    /// Forget saved calculations
    Clear,
}

/// Handle a history command
pub fn handle_history_command(storage: &Storage, cmd: HistoryCommands) -> CalcResult<()> {
    let session = AuthService::new(storage).require()?;
    let service = HistoryService::new(storage);

    match cmd {
        HistoryCommands::List { limit } => {
            println!("{}", format_history(&service.list(session.user_id, limit)?));
        }
        HistoryCommands::Clear => {
            service.clear(session.user_id)?;
            println!("History cleared");
        }
    }
    Ok(())
}
