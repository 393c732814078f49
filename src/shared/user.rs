//! User Data Structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::ids::UserId;

/// Usernames of Google accounts start with this; local accounts may not
pub const GOOGLE_USERNAME_PREFIX: &str = "google-";

/// A registered identity
///
/// Local accounts carry a bcrypt `password_hash`; accounts created through
/// Google sign-in carry a `google_id` instead. The hash is never serialized,
/// so a `User` can be handed to a template as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Unique user ID
    pub id: UserId,
    /// Login name (unique)
    pub username: String,
    /// Hashed password (bcrypt), absent for OAuth-only accounts
    #[serde(skip)]
    pub password_hash: Option<String>,
    /// Google subject id (unique when present)
    pub google_id: Option<String>,
    /// Email reported by the identity provider
    pub email: Option<String>,
    /// Free-text secret shown on the secrets page
    pub secret: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A new local account with a pre-hashed password
    pub fn local(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            password_hash: Some(password_hash.into()),
            google_id: None,
            email: None,
            secret: None,
            created_at: Utc::now(),
        }
    }

    /// A new account backed by a Google identity
    pub fn google(google_id: impl Into<String>, email: Option<String>) -> Self {
        let google_id = google_id.into();
        Self {
            id: UserId::new(),
            username: format!("{}{}", GOOGLE_USERNAME_PREFIX, google_id),
            password_hash: None,
            google_id: Some(google_id),
            email,
            secret: None,
            created_at: Utc::now(),
        }
    }
}
