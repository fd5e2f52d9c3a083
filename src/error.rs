//! Custom error types for calcdeck
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The first three variants are the
//! user-facing calculation errors; the rest cover storage, configuration and
//! the external collaborators.

use thiserror::Error;

/// The main error type for calcdeck operations
#[derive(Error, Debug)]
pub enum CalcError {
    /// Malformed or out-of-range input (non-numeric principal, unknown unit)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Mathematically undefined operation (divide by zero, log of zero)
    #[error("Domain error: {0}")]
    Domain(String),

    /// Malformed date string or digit outside the active radix
    #[error("Format error: {0}")]
    Format(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Login/session errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Exchange-rate or price source failures
    #[error("Source error: {0}")]
    Source(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl CalcError {
    /// Create a division-by-zero domain error
    pub fn divide_by_zero() -> Self {
        Self::Domain("Cannot divide by zero".into())
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for portfolio holdings
    pub fn holding_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Holding",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for price alerts
    pub fn alert_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Alert",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a domain error
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// Check if this is a format error
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// Whether the calculator should go back to its initial state after this
    /// error.
    ///
    /// Format errors are rejected inputs (a `9` typed in binary mode) and
    /// leave the display untouched; everything else resets.
    pub fn resets_state(&self) -> bool {
        !self.is_format()
    }
}

impl From<std::io::Error> for CalcError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for calcdeck operations
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CalcError::Validation("principal must be positive".into());
        assert_eq!(
            err.to_string(),
            "Validation error: principal must be positive"
        );
    }

    #[test]
    fn test_divide_by_zero() {
        let err = CalcError::divide_by_zero();
        assert_eq!(err.to_string(), "Domain error: Cannot divide by zero");
        assert!(err.is_domain());
        assert!(err.resets_state());
    }

    #[test]
    fn test_not_found_error() {
        let err = CalcError::user_not_found("alice");
        assert_eq!(err.to_string(), "User not found: alice");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_format_error_keeps_state() {
        let err = CalcError::Format("'9' is not a binary digit".into());
        assert!(err.is_format());
        assert!(!err.resets_state());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let calc_err: CalcError = io_err.into();
        assert!(matches!(calc_err, CalcError::Io(_)));
    }
}
