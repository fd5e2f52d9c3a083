//! Auth service
//!
//! Local users with Argon2-hashed passwords and a single current session.

use tracing::{debug, info};

use crate::crypto::{hash_password, verify_password, SecretString};
use crate::error::{CalcError, CalcResult};
use crate::models::{Session, User};
use crate::storage::Storage;

pub struct AuthService<'a> {
    storage: &'a Storage,
}

impl<'a> AuthService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new user; does not log them in
    pub fn register(&self, username: &str, password: &SecretString) -> CalcResult<User> {
        let username = username.trim();
        User::validate_username(username)?;

        if self.storage.users.get_by_username(username)?.is_some() {
            return Err(CalcError::Duplicate {
                entity_type: "User",
                identifier: username.to_string(),
            });
        }

        let user = User::new(username, hash_password(password)?);
        self.storage.users.insert(user.clone())?;
        info!(username = %user.username, "registered user");
        Ok(user)
    }

    /// Check credentials and make the user current
    pub fn login(&self, username: &str, password: &SecretString) -> CalcResult<Session> {
        let invalid = || CalcError::Auth("Invalid username or password".into());

        let user = self
            .storage
            .users
            .get_by_username(username.trim())?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.password_hash)? {
            debug!(username = %user.username, "rejected login");
            return Err(invalid());
        }

        let session = Session::for_user(&user);
        self.storage.users.set_session(&session)?;
        info!(username = %user.username, "logged in");
        Ok(session)
    }

    pub fn logout(&self) -> CalcResult<Option<Session>> {
        let previous = self.storage.users.session()?;
        self.storage.users.clear_session()?;
        Ok(previous)
    }

    pub fn current(&self) -> CalcResult<Option<Session>> {
        self.storage.users.session()
    }

    /// The current session, or an error telling the user to log in
    pub fn require(&self) -> CalcResult<Session> {
        self.current()?
            .ok_or_else(|| CalcError::Auth("Not logged in; run `calcdeck user login` first".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s)
    }

    #[test]
    fn test_register_then_login() {
        let storage = Storage::in_memory();
        let auth = AuthService::new(&storage);

        let user = auth.register("alice", &secret("s3cret!")).unwrap();
        assert_ne!(user.password_hash, "s3cret!");
        assert!(auth.current().unwrap().is_none());

        let session = auth.login("alice", &secret("s3cret!")).unwrap();
        assert_eq!(session.user_id, user.id);
        assert_eq!(auth.require().unwrap().username, "alice");
    }

    #[test]
    fn test_duplicate_registration() {
        let storage = Storage::in_memory();
        let auth = AuthService::new(&storage);
        auth.register("alice", &secret("s3cret!")).unwrap();

        let err = auth.register("alice", &secret("other!!")).unwrap_err();
        assert!(matches!(err, CalcError::Duplicate { .. }));
    }

    #[test]
    fn test_bad_credentials() {
        let storage = Storage::in_memory();
        let auth = AuthService::new(&storage);
        auth.register("alice", &secret("s3cret!")).unwrap();

        assert!(matches!(
            auth.login("alice", &secret("wrong!!")),
            Err(CalcError::Auth(_))
        ));
        assert!(matches!(
            auth.login("nobody", &secret("s3cret!")),
            Err(CalcError::Auth(_))
        ));
        assert!(auth.current().unwrap().is_none());
    }

    #[test]
    fn test_logout() {
        let storage = Storage::in_memory();
        let auth = AuthService::new(&storage);
        auth.register("alice", &secret("s3cret!")).unwrap();
        auth.login("alice", &secret("s3cret!")).unwrap();

        let previous = auth.logout().unwrap();
        assert_eq!(previous.unwrap().username, "alice");
        assert!(auth.current().unwrap().is_none());
        assert!(auth.require().is_err());
        assert!(auth.logout().unwrap().is_none());
    }
}
