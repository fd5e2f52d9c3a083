//! Investment tracker CLI commands
//!
//! Holdings and alerts belong to the logged-in user; favorites are shared.
//! Prices are read from the quote snapshot at `quotes.json`.

use std::time::Duration;

use clap::Subcommand;

use crate::config::paths::CalcPaths;
use crate::config::settings::Settings;
use crate::display::{format_alerts, format_holdings, format_portfolio_stats, format_quote};
use crate::error::CalcResult;
use crate::models::{ActivityKind, AlertDirection, AssetKind, Holding, Quote};
use crate::services::{
    fetch_sequenced, ActivityService, AuthService, FileQuoteSource, PortfolioService,
};
use crate::storage::Storage;

/// Portfolio subcommands
#[derive(Subcommand)]
pub enum PortfolioCommands {
    /// Add a holding
    Add {
        symbol: String,
        quantity: f64,
        /// Average purchase price
        price: f64,
        /// stock or crypto
        #[arg(short, long, default_value = "stock")]
        kind: String,
    },
    /// Remove a holding by ID
    Remove { id: String },
    /// List holdings with current values
    List,
    /// Portfolio totals and today's change
    Stats,
    /// Show quotes for symbols (defaults to the configured watch lists)
    Quotes {
        symbols: Vec<String>,
        #[arg(short, long, default_value = "stock")]
        kind: String,
    },
}

/// Alert subcommands
#[derive(Subcommand)]
pub enum AlertCommands {
    /// Notify when a symbol goes above or below a price
    Add {
        symbol: String,
        /// above or below
        direction: String,
        price: f64,
    },
    /// Remove an alert by ID
    Remove { id: String },
    /// List alerts
    List,
    /// Check alerts against current quotes
    Check,
}

/// Favorite subcommands
#[derive(Subcommand)]
pub enum FavoriteCommands {
    /// Add or remove a symbol
    Toggle { symbol: String },
    /// List favorites
    List,
}

fn quote_source(paths: &CalcPaths) -> FileQuoteSource {
    FileQuoteSource::new(paths.quotes_file())
}

fn request_delay(settings: &Settings) -> Duration {
    Duration::from_millis(settings.quotes.request_delay_ms)
}

fn quotes_for_holdings(holdings: &[Holding], paths: &CalcPaths, settings: &Settings) -> Vec<Quote> {
    let mut wanted: Vec<(String, AssetKind)> = Vec::new();
    for h in holdings {
        if !wanted.iter().any(|(s, k)| *k == h.kind && s == &h.symbol) {
            wanted.push((h.symbol.clone(), h.kind));
        }
    }
    fetch_sequenced(&quote_source(paths), &wanted, request_delay(settings))
}

/// Handle a portfolio command
pub fn handle_portfolio_command(
    storage: &Storage,
    paths: &CalcPaths,
    settings: &Settings,
    cmd: PortfolioCommands,
) -> CalcResult<()> {
    let service = PortfolioService::new(storage);

    if let PortfolioCommands::Quotes { symbols, kind } = cmd {
        let kind: AssetKind = kind.parse()?;
        let wanted: Vec<(String, AssetKind)> = if symbols.is_empty() {
            settings
                .quotes
                .stocks
                .iter()
                .map(|s| (s.clone(), AssetKind::Stock))
                .chain(settings.quotes.cryptos.iter().map(|s| (s.clone(), AssetKind::Crypto)))
                .collect()
        } else {
            symbols.into_iter().map(|s| (s, kind)).collect()
        };

        let quotes = fetch_sequenced(&quote_source(paths), &wanted, request_delay(settings));
        if quotes.is_empty() {
            println!("No quotes available.");
        }
        for quote in &quotes {
            println!("{}", format_quote(quote));
        }
        return Ok(());
    }

    let session = AuthService::new(storage).require()?;
    match cmd {
        PortfolioCommands::Add {
            symbol,
            quantity,
            price,
            kind,
        } => {
            let holding =
                service.add_holding(session.user_id, &symbol, quantity, price, kind.parse()?)?;
            println!(
                "Added {} {} at {} ({})",
                holding.quantity, holding.symbol, holding.avg_price, holding.id
            );
            ActivityService::new(storage).log(
                session.user_id,
                ActivityKind::Investment,
                format!("Added {} {} at ${}", holding.quantity, holding.symbol, holding.avg_price),
            )?;
        }
        PortfolioCommands::Remove { id } => {
            let removed = service.remove_holding(session.user_id, &id)?;
            println!("Removed {} {}", removed.quantity, removed.symbol);
        }
        PortfolioCommands::List => {
            let holdings = service.holdings(session.user_id)?;
            let quotes = quotes_for_holdings(&holdings, paths, settings);
            println!("{}", format_holdings(&holdings, &quotes, settings));
        }
        PortfolioCommands::Stats => {
            let holdings = service.holdings(session.user_id)?;
            let quotes = quotes_for_holdings(&holdings, paths, settings);
            let stats = service.stats(session.user_id, &quotes)?;
            println!("{}", format_portfolio_stats(&stats, settings));
        }
        PortfolioCommands::Quotes { .. } => {}
    }
    Ok(())
}

/// Handle an alert command
pub fn handle_alert_command(
    storage: &Storage,
    paths: &CalcPaths,
    settings: &Settings,
    cmd: AlertCommands,
) -> CalcResult<()> {
    let session = AuthService::new(storage).require()?;
    let service = PortfolioService::new(storage);

    match cmd {
        AlertCommands::Add {
            symbol,
            direction,
            price,
        } => {
            let direction: AlertDirection = direction.parse()?;
            let alert = service.add_alert(session.user_id, &symbol, direction, price)?;
            println!(
                "Will notify when {} goes {} ${} ({})",
                alert.symbol, alert.direction, alert.price, alert.id
            );
        }
        AlertCommands::Remove { id } => {
            let removed = service.remove_alert(session.user_id, &id)?;
            println!("Removed alert on {}", removed.symbol);
        }
        AlertCommands::List => {
            println!("{}", format_alerts(&service.alerts(session.user_id)?));
        }
        AlertCommands::Check => {
            let alerts = service.alerts(session.user_id)?;
            let mut wanted: Vec<(String, AssetKind)> = Vec::new();
            // Alerts are on stock tickers
            for alert in alerts.iter().filter(|a| a.active) {
                let symbol = AssetKind::Stock.normalize_symbol(&alert.symbol);
                if !wanted.iter().any(|(s, _)| *s == symbol) {
                    wanted.push((symbol, AssetKind::Stock));
                }
            }
            let quotes = fetch_sequenced(&quote_source(paths), &wanted, request_delay(settings));
            let hits = service.triggered_alerts(session.user_id, &quotes)?;
            if hits.is_empty() {
                println!("No alerts triggered.");
            }
            for (alert, quote) in hits {
                println!("{} (price {:.2})", alert.message(), quote.price);
            }
        }
    }
    Ok(())
}

/// Handle a favorite command
pub fn handle_favorite_command(storage: &Storage, cmd: FavoriteCommands) -> CalcResult<()> {
    let service = PortfolioService::new(storage);

    match cmd {
        FavoriteCommands::Toggle { symbol } => {
            if service.toggle_favorite(&symbol)? {
                println!("Added {} to favorites", symbol.trim());
            } else {
                println!("Removed {} from favorites", symbol.trim());
            }
        }
        FavoriteCommands::List => {
            let favorites = service.favorites()?;
            if favorites.is_empty() {
                println!("No favorites.");
            } else {
                println!("{}", favorites.join("\n"));
            }
        }
    }
    Ok(())
}
