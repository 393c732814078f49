/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler.
 * Each variant maps to exactly one HTTP status, so a failing request always
 * gets a definite response instead of being left open.
 *
 * # Error Categories
 *
 * ## Request Errors (4xx)
 *
 * - `NotFound` - the addressed board, list, item or user does not exist
 * - `Unauthorized` - bad credentials or a rejected sign-in
 * - `Forbidden` - the caller is neither owner nor collaborator
 * - `DuplicateIdentity` - the username is already registered
 * - `SharedError` - malformed input (ids, form fields)
 *
 * ## Server Errors (5xx)
 *
 * - `Timeout` - a traversal ran past the request deadline
 * - `Unavailable` - an optional service is not configured
 * - `Store`, `Render`, `Token`, `Hashing`, `Internal` - backend failures
 */

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use organize::backend::error::BackendError;
///
/// let err = BackendError::not_found("board", "42");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// The addressed record does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record ("board", "list", ...)
        entity: &'static str,
        /// The id that was looked up
        id: String,
    },

    /// Authentication failed
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// The caller lacks the capability for this operation
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// Registration with a username that is already taken
    #[error("Username already registered: {username}")]
    DuplicateIdentity {
        /// The rejected username
        username: String,
    },

    /// A request ran past its deadline
    #[error("Request timed out after {}ms", .after.as_millis())]
    Timeout {
        /// The deadline that was exceeded
        after: Duration,
    },

    /// An optional service is not configured
    #[error("Service unavailable: {message}")]
    Unavailable {
        /// Human-readable error message
        message: String,
    },

    /// The identity provider rejected or failed the sign-in
    #[error("OAuth error: {message}")]
    OAuth {
        /// Human-readable error message
        message: String,
    },

    /// Unexpected internal failure
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },

    /// Input validation error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Data layer failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Template rendering failure
    #[error("Render error: {0}")]
    Render(#[from] tera::Error),

    /// Session token could not be issued
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failure
    #[error("Hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}

impl BackendError {
    /// Create a new not-found error
    ///
    /// # Example
    ///
    /// ```rust
    /// use organize::backend::error::BackendError;
    ///
    /// let err = BackendError::not_found("list", "5f0c");
    /// assert!(err.message().contains("list"));
    /// ```
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a new forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a new service-unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a new OAuth error
    pub fn oauth(message: impl Into<String>) -> Self {
        Self::OAuth {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` - 404
    /// - `Unauthorized` - 401
    /// - `Forbidden` - 403
    /// - `DuplicateIdentity` - 409
    /// - `SharedError` - 400
    /// - `Timeout` - 504
    /// - `Unavailable` - 503
    /// - `OAuth` - 502
    /// - `Store` - 409 for duplicates, otherwise 500
    /// - everything else - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::DuplicateIdentity { .. } => StatusCode::CONFLICT,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::OAuth { .. } => StatusCode::BAD_GATEWAY,
            Self::Store(StoreError::Duplicate { .. }) => StatusCode::CONFLICT,
            Self::Store(_)
            | Self::Render(_)
            | Self::Token(_)
            | Self::Hashing(_)
            | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message shown to the client
    ///
    /// Server-side failures are reported generically; their details only go
    /// to the log.
    pub fn message(&self) -> String {
        if self.status_code().is_server_error()
            && !matches!(
                self,
                Self::Timeout { .. } | Self::Unavailable { .. } | Self::OAuth { .. }
            )
        {
            return "Internal server error".to_string();
        }
        self.to_string()
    }
}
