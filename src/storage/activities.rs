//! Activity log storage
//!
//! One global newest-first list of at most 100 entries under
//! `user_activities`, shared by every user and filtered on read.

use std::sync::Arc;

use super::kv::{get_collection, set_json, KeyValueStore};
use crate::error::CalcResult;
use crate::models::history::{BoundedLog, ACTIVITY_LOG_CAPACITY};
use crate::models::{Activity, UserId};

pub const ACTIVITIES_KEY: &str = "user_activities";

pub struct ActivityRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ActivityRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The whole log, newest first
    pub fn load(&self) -> CalcResult<BoundedLog<Activity>> {
        let entries: Vec<Activity> = get_collection(self.store.as_ref(), ACTIVITIES_KEY)?;
        Ok(BoundedLog::from_newest_first(ACTIVITY_LOG_CAPACITY, entries))
    }

    /// Prepend an entry, evicting the oldest past capacity
    pub fn push(&self, activity: Activity) -> CalcResult<()> {
        let mut log = self.load()?;
        log.push(activity);
        set_json(self.store.as_ref(), ACTIVITIES_KEY, &log.into_vec())
    }

    /// Entries for one user, newest first
    pub fn for_user(&self, user_id: UserId) -> CalcResult<Vec<Activity>> {
        Ok(self
            .load()?
            .into_vec()
            .into_iter()
            .filter(|a| a.user_id == user_id)
            .collect())
    }

    /// Drop every entry belonging to `user_id`
    pub fn clear_user(&self, user_id: UserId) -> CalcResult<usize> {
        let mut log = self.load()?;
        let before = log.len();
        log.retain(|a| a.user_id != user_id);
        let removed = before - log.len();
        set_json(self.store.as_ref(), ACTIVITIES_KEY, &log.into_vec())?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityKind;
    use crate::storage::kv::MemoryStore;

    #[test]
    fn test_global_cap_and_order() {
        let repo = ActivityRepository::new(Arc::new(MemoryStore::new()));
        let user = UserId::new();
        for i in 0..(ACTIVITY_LOG_CAPACITY + 20) {
            repo.push(Activity::new(user, ActivityKind::Calculation, format!("#{}", i)))
                .unwrap();
        }

        let log = repo.load().unwrap();
        assert_eq!(log.len(), ACTIVITY_LOG_CAPACITY);
        assert_eq!(log.latest().unwrap().description, "#119");
    }

    #[test]
    fn test_filter_by_user() {
        let repo = ActivityRepository::new(Arc::new(MemoryStore::new()));
        let alice = UserId::new();
        let bob = UserId::new();
        repo.push(Activity::new(alice, ActivityKind::Date, "a1")).unwrap();
        repo.push(Activity::new(bob, ActivityKind::Exchange, "b1")).unwrap();
        repo.push(Activity::new(alice, ActivityKind::CoinFlip, "a2")).unwrap();

        let mine: Vec<_> = repo
            .for_user(alice)
            .unwrap()
            .into_iter()
            .map(|a| a.description)
            .collect();
        assert_eq!(mine, vec!["a2", "a1"]);

        assert_eq!(repo.clear_user(alice).unwrap(), 2);
        assert!(repo.for_user(alice).unwrap().is_empty());
        assert_eq!(repo.for_user(bob).unwrap().len(), 1);
    }
}
