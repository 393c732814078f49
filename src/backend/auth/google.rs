/**
 * Google OAuth Client
 *
 * Authorization-code flow against Google's OAuth 2.0 endpoints:
 *
 * 1. `authorize_url` - where to send the browser, carrying our `state`
 * 2. `exchange_code` - trade the callback `code` for an access token, then
 *    fetch the userinfo profile with it
 *
 * Endpoints are overridable so tests can point the client at a mock server.
 */

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::server::config::GoogleCredentials;

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

const SCOPES: &str = "profile email";

/// The parts of a Google profile we keep
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GoogleProfile {
    /// Stable Google subject id
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Google OAuth endpoints plus client credentials
pub struct GoogleOAuth {
    client: Client,
    credentials: GoogleCredentials,
    auth_url: String,
    token_url: String,
    userinfo_url: String,
}

impl GoogleOAuth {
    /// Client for Google's production endpoints
    pub fn new(credentials: GoogleCredentials) -> Self {
        Self::with_endpoints(
            credentials,
            GOOGLE_AUTH_URL,
            GOOGLE_TOKEN_URL,
            GOOGLE_USERINFO_URL,
        )
    }

    pub fn with_endpoints(
        credentials: GoogleCredentials,
        auth_url: impl Into<String>,
        token_url: impl Into<String>,
        userinfo_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            credentials,
            auth_url: auth_url.into(),
            token_url: token_url.into(),
            userinfo_url: userinfo_url.into(),
        }
    }

    /// Consent-screen URL for the given `state`
    pub fn authorize_url(&self, state: &str) -> Result<Url, BackendError> {
        Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("redirect_uri", self.credentials.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", SCOPES),
                ("state", state),
            ],
        )
        .map_err(|e| BackendError::internal(format!("Invalid OAuth authorize URL: {}", e)))
    }

    /// Exchange an authorization code and fetch the signed-in profile
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleProfile, BackendError> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("code", code),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("redirect_uri", self.credentials.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| BackendError::oauth(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(BackendError::oauth(format!(
                "Token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| BackendError::oauth(format!("Failed to parse token response: {}", e)))?;

        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| BackendError::oauth(format!("Userinfo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(BackendError::oauth(format!(
                "Userinfo endpoint returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::oauth(format!("Failed to parse profile: {}", e)))
    }
}
