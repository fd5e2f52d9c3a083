//! Currency exchange CLI commands
//!
//! Rates come from the snapshot at `rates.json` in the config directory.

use clap::Subcommand;

use crate::calc::exchange::{convert_between, inverse_rate, sanitize_amount_input};
use crate::config::paths::CalcPaths;
use crate::config::settings::Settings;
use crate::display::{format_exchange, format_grouped};
use crate::error::{CalcError, CalcResult};
use crate::models::ActivityKind;
use crate::services::{ActivityService, FileRateSource, RateSource};
use crate::storage::Storage;

/// Exchange subcommands
#[derive(Subcommand)]
pub enum ExchangeCommands {
    /// Convert an amount into another currency
    Convert {
        amount: String,
        /// Target currency code
        to: String,
        /// Source currency (defaults to the configured base)
        #[arg(short, long)]
        from: Option<String>,
    },
    /// List the available rates
    Rates,
    /// Show the rate between two currencies both ways
    Rate {
        to: String,
        #[arg(short, long)]
        from: Option<String>,
    },
}

/// Handle an exchange command
pub fn handle_exchange_command(
    storage: &Storage,
    paths: &CalcPaths,
    settings: &Settings,
    cmd: ExchangeCommands,
) -> CalcResult<()> {
    let source = FileRateSource::new(paths.rates_file());
    let fmt = &settings.number_format;
    let rate_text = |v: f64| format_grouped(v, 2, 4, fmt);

    match cmd {
        ExchangeCommands::Convert { amount, to, from } => {
            let from = from.unwrap_or_else(|| settings.exchange.base_currency.clone());
            let cleaned = sanitize_amount_input(&amount);
            if cleaned.is_empty() {
                return Err(CalcError::Validation(format!("Invalid amount: '{}'", amount.trim())));
            }
            let value: f64 = cleaned
                .parse()
                .map_err(|_| CalcError::Validation(format!("Invalid amount: '{}'", cleaned)))?;

            let table = source.fetch(&from)?;
            let converted = convert_between(value, &from, &to, &table)?;
            let result = format_exchange(converted, settings.exchange.exponent_threshold, fmt);
            println!("{} {}", result, to.trim().to_uppercase());

            ActivityService::new(storage).log_current(
                ActivityKind::Exchange,
                format!(
                    "{} {} = {} {}",
                    cleaned,
                    from.trim().to_uppercase(),
                    result,
                    to.trim().to_uppercase()
                ),
            )?;
        }
        ExchangeCommands::Rates => {
            let table = source.fetch(&settings.exchange.base_currency)?;
            println!(
                "Rates against {} (fetched {})",
                table.base,
                table.fetched_at.format("%Y-%m-%d %H:%M")
            );
            for (code, rate) in &table.rates {
                println!("  {:<5} {:>16}", code, rate_text(*rate));
            }
        }
        ExchangeCommands::Rate { to, from } => {
            let from = from.unwrap_or_else(|| settings.exchange.base_currency.clone());
            let table = source.fetch(&from)?;
            let from = table.base.clone();
            let to = to.trim().to_uppercase();
            println!("1 {} = {} {}", from, rate_text(table.rate(&to)?), to);
            println!("1 {} = {} {}", to, rate_text(inverse_rate(&to, &table)?), from);
        }
    }
    Ok(())
}
