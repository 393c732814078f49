/**
 * Local Accounts
 *
 * Registration and password verification on top of the [`Store`]. Passwords
 * are hashed with bcrypt; the plain text never leaves this module.
 */

use bcrypt::{hash, verify};

use crate::backend::error::BackendError;
use crate::backend::store::{Store, StoreError};
use crate::shared::{SharedError, User, GOOGLE_USERNAME_PREFIX};

/// Create a local account
///
/// # Errors
///
/// * `SharedError::ValidationError` - empty username or password, or a
///   username in the namespace reserved for Google accounts
/// * `BackendError::DuplicateIdentity` - username already registered; nothing
///   is written
pub async fn register_user(
    store: &dyn Store,
    username: &str,
    password: &str,
    cost: u32,
) -> Result<User, BackendError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(SharedError::validation("username", "Username is required").into());
    }
    if username.starts_with(GOOGLE_USERNAME_PREFIX) {
        tracing::warn!("Registration rejected, reserved username: {}", username);
        return Err(SharedError::validation(
            "username",
            format!("Usernames starting with '{}' are reserved", GOOGLE_USERNAME_PREFIX),
        )
        .into());
    }
    if password.is_empty() {
        return Err(SharedError::validation("password", "Password is required").into());
    }

    if store.find_user_by_username(username).await?.is_some() {
        tracing::warn!("Registration rejected, username taken: {}", username);
        return Err(BackendError::DuplicateIdentity {
            username: username.to_string(),
        });
    }

    let password_hash = hash(password, cost)?;
    match store.insert_user(User::local(username, password_hash)).await {
        Ok(user) => {
            tracing::info!("Registered user {} ({})", user.username, user.id);
            Ok(user)
        }
        // Lost a race with a concurrent registration
        Err(StoreError::Duplicate { .. }) => Err(BackendError::DuplicateIdentity {
            username: username.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Check a username/password pair
///
/// Unknown users, Google-only accounts and wrong passwords all fail the same
/// way.
pub async fn authenticate(
    store: &dyn Store,
    username: &str,
    password: &str,
) -> Result<User, BackendError> {
    let user = store
        .find_user_by_username(username.trim())
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", username);
            BackendError::unauthorized("Invalid username or password")
        })?;

    let Some(password_hash) = user.password_hash.as_deref() else {
        tracing::warn!("Password login attempted for Google account: {}", username);
        return Err(BackendError::unauthorized("Invalid username or password"));
    };

    if !verify(password, password_hash)? {
        tracing::warn!("Invalid password for user: {}", username);
        return Err(BackendError::unauthorized("Invalid username or password"));
    }

    Ok(user)
}
