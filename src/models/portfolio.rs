//! Investment tracker records: quotes, holdings and price alerts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ids::{AlertId, HoldingId};
use crate::error::{CalcError, CalcResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Stock,
    Crypto,
}

impl AssetKind {
    /// Symbols are upper-case tickers for stocks, lower-case ids for crypto
    pub fn normalize_symbol(&self, symbol: &str) -> String {
        match self {
            Self::Stock => symbol.trim().to_uppercase(),
            Self::Crypto => symbol.trim().to_lowercase(),
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stock => write!(f, "stock"),
            Self::Crypto => write!(f, "crypto"),
        }
    }
}

impl FromStr for AssetKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stock" | "stocks" => Ok(Self::Stock),
            "crypto" | "cryptos" | "coin" => Ok(Self::Crypto),
            other => Err(CalcError::Validation(format!(
                "Unknown asset type: '{}'; use stock or crypto",
                other
            ))),
        }
    }
}

/// Latest price of one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub kind: AssetKind,
    pub price: f64,
    /// Absolute change over the session (stocks) or 24h (crypto)
    pub change: f64,
    pub change_percent: f64,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    /// Previous close; stocks only
    #[serde(default)]
    pub prev_close: Option<f64>,
}

impl Quote {
    /// Price a day ago: previous close for stocks, `price - change` otherwise
    pub fn previous_price(&self) -> f64 {
        match (self.kind, self.prev_close) {
            (AssetKind::Stock, Some(prev)) => prev,
            _ => self.price - self.change,
        }
    }

    pub fn matches(&self, symbol: &str, kind: AssetKind) -> bool {
        self.kind == kind && self.symbol.eq_ignore_ascii_case(symbol.trim())
    }
}

fn check_amount(label: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::Validation(format!(
            "{} must be a positive number, got {}",
            label, value
        )));
    }
    Ok(value)
}

fn check_symbol(symbol: &str) -> CalcResult<()> {
    if symbol.trim().is_empty() {
        return Err(CalcError::Validation("Symbol cannot be empty".into()));
    }
    Ok(())
}

/// A position in the user's portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: HoldingId,
    pub symbol: String,
    pub quantity: f64,
    pub avg_price: f64,
    pub kind: AssetKind,
}

impl Holding {
    pub fn new(symbol: &str, quantity: f64, avg_price: f64, kind: AssetKind) -> CalcResult<Self> {
        check_symbol(symbol)?;
        Ok(Self {
            id: HoldingId::new(),
            symbol: kind.normalize_symbol(symbol),
            quantity: check_amount("Quantity", quantity)?,
            avg_price: check_amount("Average price", avg_price)?,
            kind,
        })
    }

    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.avg_price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertDirection {
    Above,
    Below,
}

impl fmt::Display for AlertDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Above => write!(f, "above"),
            Self::Below => write!(f, "below"),
        }
    }
}

impl FromStr for AlertDirection {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "above" | ">" | ">=" => Ok(Self::Above),
            "below" | "<" | "<=" => Ok(Self::Below),
            other => Err(CalcError::Validation(format!(
                "Unknown alert direction: '{}'; use above or below",
                other
            ))),
        }
    }
}

/// Notify when a symbol crosses a price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    pub id: AlertId,
    pub symbol: String,
    pub direction: AlertDirection,
    pub price: f64,
    pub active: bool,
}

impl PriceAlert {
    pub fn new(symbol: &str, direction: AlertDirection, price: f64) -> CalcResult<Self> {
        check_symbol(symbol)?;
        Ok(Self {
            id: AlertId::new(),
            symbol: symbol.trim().to_string(),
            direction,
            price: check_amount("Alert price", price)?,
            active: true,
        })
    }

    /// Whether `quote` trips this alert (inclusive on the target price)
    pub fn is_triggered(&self, quote: &Quote) -> bool {
        if !self.active || !self.symbol.eq_ignore_ascii_case(&quote.symbol) {
            return false;
        }
        match self.direction {
            AlertDirection::Above => quote.price >= self.price,
            AlertDirection::Below => quote.price <= self.price,
        }
    }

    /// Human-readable notification text
    pub fn message(&self) -> String {
        format!("{} is now {} ${}", self.symbol, self.direction, self.price)
    }
}

/// Portfolio totals for the quotes at hand
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub total_value: f64,
    /// Change in value since the previous price
    pub daily_change: f64,
    pub cost_basis: f64,
    /// Holdings without a quote are left out of every total
    pub unpriced: usize,
}

impl PortfolioStats {
    pub fn compute(holdings: &[Holding], quotes: &[Quote]) -> Self {
        let mut stats = Self::default();
        for holding in holdings {
            let Some(quote) = quotes
                .iter()
                .find(|q| q.matches(&holding.symbol, holding.kind))
            else {
                stats.unpriced += 1;
                continue;
            };
            let current = quote.price * holding.quantity;
            let previous = quote.previous_price() * holding.quantity;
            stats.total_value += current;
            stats.daily_change += current - previous;
            stats.cost_basis += holding.cost_basis();
        }
        stats
    }

    /// Gain over cost for priced holdings
    pub fn unrealized_gain(&self) -> f64 {
        self.total_value - self.cost_basis
    }
}
