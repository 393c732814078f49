//! Shared Error Types
//!
//! Errors raised while turning untrusted input (path segments, form fields,
//! stored text) into domain types.
//!
//! # Usage
//!
//! ```rust
//! use organize::shared::error::SharedError;
//!
//! let error = SharedError::validation("listTitle", "must not be empty");
//! ```
use thiserror::Error;

/// Errors that can occur while building domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A field failed validation
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// An identifier could not be parsed
    #[error("Invalid {kind} id: {value}")]
    InvalidId {
        /// Which kind of identifier was expected
        kind: &'static str,
        /// The rejected input
        value: String,
    },

    /// A status string is not one of the known item states
    #[error("Unknown item status: {value}")]
    UnknownStatus {
        /// The rejected input
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid id error
    pub fn invalid_id(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidId {
            kind,
            value: value.into(),
        }
    }
}
