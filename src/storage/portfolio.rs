//! Investment tracker storage: per-user holdings and alerts, plus the
//! favorites list

use std::sync::Arc;

use super::kv::{get_collection, set_json, KeyValueStore};
use crate::error::CalcResult;
use crate::models::{Holding, PriceAlert, UserId};

pub const FAVORITES_KEY: &str = "favorites";

fn holdings_key(user_id: UserId) -> String {
    format!("{}_portfolio", user_id.as_uuid())
}

fn alerts_key(user_id: UserId) -> String {
    format!("{}_alerts", user_id.as_uuid())
}

pub struct PortfolioRepository {
    store: Arc<dyn KeyValueStore>,
}

impl PortfolioRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn holdings(&self, user_id: UserId) -> CalcResult<Vec<Holding>> {
        get_collection(self.store.as_ref(), &holdings_key(user_id))
    }

    pub fn save_holdings(&self, user_id: UserId, holdings: &[Holding]) -> CalcResult<()> {
        set_json(self.store.as_ref(), &holdings_key(user_id), holdings)
    }

    pub fn alerts(&self, user_id: UserId) -> CalcResult<Vec<PriceAlert>> {
        get_collection(self.store.as_ref(), &alerts_key(user_id))
    }

    pub fn save_alerts(&self, user_id: UserId, alerts: &[PriceAlert]) -> CalcResult<()> {
        set_json(self.store.as_ref(), &alerts_key(user_id), alerts)
    }

    pub fn favorites(&self) -> CalcResult<Vec<String>> {
        get_collection(self.store.as_ref(), FAVORITES_KEY)
    }

    pub fn save_favorites(&self, favorites: &[String]) -> CalcResult<()> {
        set_json(self.store.as_ref(), FAVORITES_KEY, favorites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertDirection, AssetKind};
    use crate::storage::kv::MemoryStore;

    #[test]
    fn test_holdings_and_alerts_per_user() {
        let repo = PortfolioRepository::new(Arc::new(MemoryStore::new()));
        let alice = UserId::new();
        let bob = UserId::new();

        let holding = Holding::new("AAPL", 2.0, 100.0, AssetKind::Stock).unwrap();
        repo.save_holdings(alice, &[holding.clone()]).unwrap();
        let alert = PriceAlert::new("AAPL", AlertDirection::Below, 90.0).unwrap();
        repo.save_alerts(alice, &[alert.clone()]).unwrap();

        assert_eq!(repo.holdings(alice).unwrap(), vec![holding]);
        assert_eq!(repo.alerts(alice).unwrap(), vec![alert]);
        assert!(repo.holdings(bob).unwrap().is_empty());
        assert!(repo.alerts(bob).unwrap().is_empty());
    }

    #[test]
    fn test_favorites_default_empty() {
        let repo = PortfolioRepository::new(Arc::new(MemoryStore::new()));
        assert!(repo.favorites().unwrap().is_empty());
        repo.save_favorites(&["AAPL".to_string()]).unwrap();
        assert_eq!(repo.favorites().unwrap(), vec!["AAPL"]);
    }
}
