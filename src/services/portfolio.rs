//! Portfolio service
//!
//! Holdings, price alerts and favorites for the investment tracker, plus
//! evaluation against a batch of quotes.

use tracing::debug;

use crate::error::{CalcError, CalcResult};
use crate::models::{
    AlertDirection, AssetKind, Holding, PortfolioStats, PriceAlert, Quote, UserId,
};
use crate::storage::Storage;

pub struct PortfolioService<'a> {
    storage: &'a Storage,
}

impl<'a> PortfolioService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn holdings(&self, user_id: UserId) -> CalcResult<Vec<Holding>> {
        self.storage.portfolio.holdings(user_id)
    }

    pub fn add_holding(
        &self,
        user_id: UserId,
        symbol: &str,
        quantity: f64,
        avg_price: f64,
        kind: AssetKind,
    ) -> CalcResult<Holding> {
        let holding = Holding::new(symbol, quantity, avg_price, kind)?;
        let mut holdings = self.holdings(user_id)?;
        holdings.push(holding.clone());
        self.storage.portfolio.save_holdings(user_id, &holdings)?;
        debug!(symbol = %holding.symbol, quantity, "added holding");
        Ok(holding)
    }

    pub fn remove_holding(&self, user_id: UserId, id: &str) -> CalcResult<Holding> {
        let mut holdings = self.holdings(user_id)?;
        let index = holdings
            .iter()
            .position(|h| h.id.matches(id))
            .ok_or_else(|| CalcError::holding_not_found(id))?;
        let removed = holdings.remove(index);
        self.storage.portfolio.save_holdings(user_id, &holdings)?;
        Ok(removed)
    }

    pub fn alerts(&self, user_id: UserId) -> CalcResult<Vec<PriceAlert>> {
        self.storage.portfolio.alerts(user_id)
    }

    pub fn add_alert(
        &self,
        user_id: UserId,
        symbol: &str,
        direction: AlertDirection,
        price: f64,
    ) -> CalcResult<PriceAlert> {
        let alert = PriceAlert::new(symbol, direction, price)?;
        let mut alerts = self.alerts(user_id)?;
        alerts.push(alert.clone());
        self.storage.portfolio.save_alerts(user_id, &alerts)?;
        Ok(alert)
    }

    pub fn remove_alert(&self, user_id: UserId, id: &str) -> CalcResult<PriceAlert> {
        let mut alerts = self.alerts(user_id)?;
        let index = alerts
            .iter()
            .position(|a| a.id.matches(id))
            .ok_or_else(|| CalcError::alert_not_found(id))?;
        let removed = alerts.remove(index);
        self.storage.portfolio.save_alerts(user_id, &alerts)?;
        Ok(removed)
    }

    /// Alerts tripped by any of `quotes`, with their notification text
    pub fn triggered_alerts(
        &self,
        user_id: UserId,
        quotes: &[Quote],
    ) -> CalcResult<Vec<(PriceAlert, Quote)>> {
        let mut hits = Vec::new();
        for alert in self.alerts(user_id)? {
            if let Some(quote) = quotes.iter().find(|q| alert.is_triggered(q)) {
                hits.push((alert.clone(), quote.clone()));
            }
        }
        Ok(hits)
    }

    pub fn stats(&self, user_id: UserId, quotes: &[Quote]) -> CalcResult<PortfolioStats> {
        Ok(PortfolioStats::compute(&self.holdings(user_id)?, quotes))
    }

    pub fn favorites(&self) -> CalcResult<Vec<String>> {
        self.storage.portfolio.favorites()
    }

    /// Add `symbol` to favorites or take it out; returns whether it is now a
    /// favorite
    pub fn toggle_favorite(&self, symbol: &str) -> CalcResult<bool> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(CalcError::Validation("Symbol cannot be empty".into()));
        }

        let mut favorites = self.favorites()?;
        let now_favorite = match favorites.iter().position(|s| s == symbol) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                favorites.push(symbol.to_string());
                true
            }
        };
        self.storage.portfolio.save_favorites(&favorites)?;
        Ok(now_favorite)
    }
}
