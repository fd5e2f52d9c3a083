//! Local user accounts and the login session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;
use crate::error::{CalcError, CalcResult};

/// Maximum username length
pub const MAX_USERNAME_LEN: usize = 32;

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,

    /// Argon2 PHC string; never the password itself
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    /// Check that a username is usable
    pub fn validate_username(username: &str) -> CalcResult<()> {
        if username.trim().is_empty() {
            return Err(CalcError::Validation("Username cannot be empty".into()));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(CalcError::Validation(format!(
                "Username cannot exceed {} characters",
                MAX_USERNAME_LEN
            )));
        }
        if username.chars().any(char::is_whitespace) {
            return Err(CalcError::Validation(
                "Username cannot contain whitespace".into(),
            ));
        }
        Ok(())
    }
}

/// The logged-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            logged_in_at: Utc::now(),
        }
    }
}
