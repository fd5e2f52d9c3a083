//! Date calculator CLI commands

use clap::Subcommand;

use crate::calc::dates::{
    add_period, format_date, format_date_long, parse_date, subtract_period, DateSpan, PeriodUnit,
};
use crate::error::CalcResult;
use crate::models::ActivityKind;
use crate::services::ActivityService;
use crate::storage::Storage;

/// Date subcommands
#[derive(Subcommand)]
pub enum DateCommands {
    /// Days between two dates (YYYY-MM-DD)
    Diff { from: String, to: String },
    /// Add days, months or years to a date
    Add {
        date: String,
        #[arg(allow_hyphen_values = true)]
        amount: i64,
        /// days, months or years
        #[arg(default_value = "days")]
        unit: String,
    },
    /// Subtract days, months or years from a date
    Sub {
        date: String,
        #[arg(allow_hyphen_values = true)]
        amount: i64,
        #[arg(default_value = "days")]
        unit: String,
    },
}

/// Handle a date command
pub fn handle_date_command(storage: &Storage, cmd: DateCommands) -> CalcResult<()> {
    let description = match cmd {
        DateCommands::Diff { from, to } => {
            let span = DateSpan::between(parse_date(&from)?, parse_date(&to)?);
            println!("{}", span);
            format!("{} to {}: {} days", from.trim(), to.trim(), span.total_days)
        }
        DateCommands::Add { date, amount, unit } => {
            let unit: PeriodUnit = unit.parse()?;
            let result = add_period(parse_date(&date)?, amount, unit)?;
            println!("{}  ({})", format_date(result), format_date_long(result));
            format!("{} + {} {} = {}", date.trim(), amount, unit.name(), format_date(result))
        }
        DateCommands::Sub { date, amount, unit } => {
            let unit: PeriodUnit = unit.parse()?;
            let result = subtract_period(parse_date(&date)?, amount, unit)?;
            println!("{}  ({})", format_date(result), format_date_long(result));
            format!("{} - {} {} = {}", date.trim(), amount, unit.name(), format_date(result))
        }
    };

    ActivityService::new(storage).log_current(ActivityKind::Date, description)?;
    Ok(())
}
