//! Credential handling for calcdeck
//!
//! Argon2id password hashing and a zeroizing string for passwords in flight.

pub mod password;
pub mod secret;

pub use password::{hash_password, verify_password, MIN_PASSWORD_LEN};
pub use secret::SecretString;
