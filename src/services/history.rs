//! History service
//!
//! Copies calculator history into the user's persisted 50-entry log.

use crate::error::CalcResult;
use crate::models::{HistoryEntry, UserId};
use crate::storage::Storage;

pub struct HistoryService<'a> {
    storage: &'a Storage,
}

impl<'a> HistoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Persist entries given oldest first
    pub fn record<I>(&self, user_id: UserId, entries: I) -> CalcResult<()>
    where
        I: IntoIterator<Item = HistoryEntry>,
    {
        self.storage.history.append(user_id, entries)
    }

    /// Newest first, at most `limit` entries
    pub fn list(&self, user_id: UserId, limit: usize) -> CalcResult<Vec<HistoryEntry>> {
        Ok(self
            .storage
            .history
            .load(user_id)?
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }

    pub fn clear(&self, user_id: UserId) -> CalcResult<()> {
        self.storage.history.clear(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_list() {
        let storage = Storage::in_memory();
        let service = HistoryService::new(&storage);
        let user = UserId::new();

        service
            .record(
                user,
                vec![
                    HistoryEntry::new("7 + 3", "10"),
                    HistoryEntry::new("10 × 2", "20"),
                ],
            )
            .unwrap();

        let listed = service.list(user, 1).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].calculation, "10 × 2");

        service.clear(user).unwrap();
        assert!(service.list(user, 10).unwrap().is_empty());
    }
}
