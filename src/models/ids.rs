//! Strongly-typed ID wrappers for persisted records
//!
//! Users, activity entries, holdings and price alerts each get their own
//! newtype so they cannot be mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Hex digits shown after the prefix in the short form
const SHORT_LEN: usize = 8;

macro_rules! record_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Whether `reference` names this ID
            ///
            /// Accepts the short form printed by the CLI (`hld-1a2b3c4d`),
            /// the full UUID, or a UUID prefix of at least eight digits.
            pub fn matches(&self, reference: &str) -> bool {
                let reference = reference.trim().to_ascii_lowercase();
                let reference = reference.strip_prefix(Self::PREFIX).unwrap_or(&reference);
                reference.len() >= SHORT_LEN && self.0.to_string().starts_with(reference)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let uuid = self.0.to_string();
                write!(f, "{}{}", Self::PREFIX, &uuid[..SHORT_LEN])
            }
        }
    };
}

record_id!(UserId, "usr-");
record_id!(ActivityId, "act-");
record_id!(HoldingId, "hld-");
record_id!(AlertId, "alr-");
