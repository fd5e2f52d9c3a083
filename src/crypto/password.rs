//! Password hashing using Argon2id
//!
//! Stored hashes are PHC strings (`$argon2id$v=19$...`) carrying their own
//! salt and parameters, so verification needs nothing but the hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::secret::SecretString;
use crate::error::{CalcError, CalcResult};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 4;

/// Hash a password with a fresh random salt
pub fn hash_password(password: &SecretString) -> CalcResult<String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CalcError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CalcError::Auth(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored hash
///
/// A wrong password is `Ok(false)`; only a corrupt stored hash is an error.
pub fn verify_password(password: &SecretString, stored: &str) -> CalcResult<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| CalcError::Auth(format!("Stored password hash is invalid: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CalcError::Auth(format!("Password verification failed: {}", e))),
    }
}
