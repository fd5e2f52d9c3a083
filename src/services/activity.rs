//! Activity service
//!
//! Records what each user did and summarises it for the dashboard.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::CalcResult;
use crate::models::{Activity, ActivityKind, ActivityStats, UserId};
use crate::storage::Storage;

/// Entries shown in the "recent activity" panel
pub const RECENT_LIMIT: usize = 3;

pub struct ActivityService<'a> {
    storage: &'a Storage,
}

impl<'a> ActivityService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn log(
        &self,
        user_id: UserId,
        kind: ActivityKind,
        description: impl Into<String>,
    ) -> CalcResult<Activity> {
        let activity = Activity::new(user_id, kind, description);
        debug!(kind = %activity.kind, description = %activity.description, "activity");
        self.storage.activities.push(activity.clone())?;
        Ok(activity)
    }

    /// Log against the current session; a no-op when nobody is logged in
    pub fn log_current(
        &self,
        kind: ActivityKind,
        description: impl Into<String>,
    ) -> CalcResult<Option<Activity>> {
        match self.storage.users.session()? {
            Some(session) => self.log(session.user_id, kind, description).map(Some),
            None => Ok(None),
        }
    }

    /// All of a user's entries, newest first
    pub fn list(&self, user_id: UserId) -> CalcResult<Vec<Activity>> {
        self.storage.activities.for_user(user_id)
    }

    pub fn recent(&self, user_id: UserId, limit: usize) -> CalcResult<Vec<Activity>> {
        let mut entries = self.list(user_id)?;
        entries.truncate(limit);
        Ok(entries)
    }

    pub fn stats(&self, user_id: UserId, now: DateTime<Utc>) -> CalcResult<ActivityStats> {
        Ok(ActivityStats::compute(&self.list(user_id)?, now))
    }

    pub fn clear(&self, user_id: UserId) -> CalcResult<usize> {
        self.storage.activities.clear_user(user_id)
    }
}
