//! Per-user calculation history (newest first, capped at 50)

use std::sync::Arc;

use super::kv::{get_collection, set_json, KeyValueStore};
use crate::error::CalcResult;
use crate::models::history::{BoundedLog, HistoryEntry, GLOBAL_HISTORY_CAPACITY};
use crate::models::UserId;

pub fn history_key(user_id: UserId) -> String {
    format!("{}_history", user_id.as_uuid())
}

pub struct HistoryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self, user_id: UserId) -> CalcResult<BoundedLog<HistoryEntry>> {
        let entries: Vec<HistoryEntry> =
            get_collection(self.store.as_ref(), &history_key(user_id))?;
        Ok(BoundedLog::from_newest_first(GLOBAL_HISTORY_CAPACITY, entries))
    }

    /// Append entries given oldest first, so the last one ends up newest
    pub fn append(
        &self,
        user_id: UserId,
        entries: impl IntoIterator<Item = HistoryEntry>,
    ) -> CalcResult<()> {
        let mut log = self.load(user_id)?;
        for entry in entries {
            log.push(entry);
        }
        set_json(self.store.as_ref(), &history_key(user_id), &log.into_vec())
    }

    pub fn clear(&self, user_id: UserId) -> CalcResult<()> {
        self.store.remove(&history_key(user_id))
    }
}
