/**
 * Authentication Handler Types
 *
 * Form bodies and query strings accepted by the authentication handlers.
 */

use serde::Deserialize;

/// `username`/`password` form posted by the login and register pages
#[derive(Deserialize, Debug)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Query string Google appends to the callback URL
#[derive(Deserialize, Debug, Default)]
pub struct OAuthCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set instead of `code` when the user declined consent
    pub error: Option<String>,
}
