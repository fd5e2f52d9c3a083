//! User list and login session
//!
//! Users live under `users` as one JSON array; the session under
//! `currentUser`.

use std::sync::Arc;

use super::kv::{get_collection, get_json, set_json, KeyValueStore};
use crate::error::{CalcError, CalcResult};
use crate::models::{Session, User};

pub const USERS_KEY: &str = "users";
pub const SESSION_KEY: &str = "currentUser";

/// Repository for users and the current session
pub struct UserRepository {
    store: Arc<dyn KeyValueStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn get_all(&self) -> CalcResult<Vec<User>> {
        get_collection(self.store.as_ref(), USERS_KEY)
    }

    /// Find a user by exact username
    pub fn get_by_username(&self, username: &str) -> CalcResult<Option<User>> {
        Ok(self.get_all()?.into_iter().find(|u| u.username == username))
    }

    /// Add a user; usernames are unique
    pub fn insert(&self, user: User) -> CalcResult<()> {
        let mut users = self.get_all()?;
        if users.iter().any(|u| u.username == user.username) {
            return Err(CalcError::Duplicate {
                entity_type: "User",
                identifier: user.username,
            });
        }
        users.push(user);
        set_json(self.store.as_ref(), USERS_KEY, &users)
    }

    pub fn session(&self) -> CalcResult<Option<Session>> {
        get_json(self.store.as_ref(), SESSION_KEY)
    }

    pub fn set_session(&self, session: &Session) -> CalcResult<()> {
        set_json(self.store.as_ref(), SESSION_KEY, session)
    }

    pub fn clear_session(&self) -> CalcResult<()> {
        self.store.remove(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryStore;

    fn repo() -> UserRepository {
        UserRepository::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_insert_and_find() {
        let repo = repo();
        repo.insert(User::new("alice", "hash")).unwrap();
        repo.insert(User::new("bob", "hash")).unwrap();

        assert_eq!(repo.get_all().unwrap().len(), 2);
        assert!(repo.get_by_username("alice").unwrap().is_some());
        assert!(repo.get_by_username("carol").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let repo = repo();
        repo.insert(User::new("alice", "hash")).unwrap();
        let err = repo.insert(User::new("alice", "other")).unwrap_err();
        assert!(matches!(err, CalcError::Duplicate { .. }));
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_session_round_trip() {
        let repo = repo();
        assert!(repo.session().unwrap().is_none());

        let user = User::new("alice", "hash");
        repo.set_session(&Session::for_user(&user)).unwrap();
        assert_eq!(repo.session().unwrap().unwrap().user_id, user.id);

        repo.clear_session().unwrap();
        assert!(repo.session().unwrap().is_none());
    }
}
