/**
 * Google Sign-In Handlers
 *
 * - `GET /auth/google` - remember a random `state` in a cookie and send the
 *   browser to Google's consent screen
 * - `GET /auth/google/secrets` - check `state`, exchange the code, find or
 *   create the user and start a session
 *
 * A declined consent, mismatched state, failed exchange or failure to record
 * the account sends the browser back to `/login`. Both routes answer 503
 * when Google sign-in is not configured.
 */

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::google::GoogleOAuth;
use crate::backend::auth::handlers::login::start_session;
use crate::backend::auth::handlers::types::OAuthCallback;
use crate::backend::auth::sessions::{
    clear_oauth_state_cookie, oauth_state_cookie, read_cookie, redirect_with_cookies,
    OAUTH_STATE_COOKIE,
};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

fn configured(state: &AppState) -> Result<Arc<GoogleOAuth>, BackendError> {
    state.oauth.clone().ok_or_else(|| {
        tracing::warn!("Google sign-in requested but not configured");
        BackendError::unavailable("Google sign-in is not configured")
    })
}

fn back_to_login() -> Result<Response, BackendError> {
    redirect_with_cookies("/login", &[clear_oauth_state_cookie()])
}

pub async fn google_redirect(State(state): State<AppState>) -> Result<Response, BackendError> {
    let oauth = configured(&state)?;
    let csrf_state = Uuid::new_v4().simple().to_string();
    let url = oauth.authorize_url(&csrf_state)?;

    redirect_with_cookies(url.as_str(), &[oauth_state_cookie(&csrf_state)])
}

pub async fn google_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(callback): Query<OAuthCallback>,
) -> Result<Response, BackendError> {
    let oauth = configured(&state)?;

    if let Some(error) = callback.error.as_deref() {
        tracing::warn!("Google sign-in declined: {}", error);
        return back_to_login();
    }

    let expected = read_cookie(&headers, OAUTH_STATE_COOKIE);
    if expected.is_none() || expected != callback.state {
        tracing::warn!("Google callback state mismatch");
        return back_to_login();
    }

    let Some(code) = callback.code.as_deref() else {
        tracing::warn!("Google callback without code");
        return back_to_login();
    };

    let profile = match oauth.exchange_code(code).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("Google code exchange failed: {}", e);
            return back_to_login();
        }
    };

    let user = match state
        .store
        .find_or_create_google_user(&profile.sub, profile.email.as_deref())
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to record Google user {}: {}", profile.sub, e);
            return back_to_login();
        }
    };

    tracing::info!("Google sign-in for {} ({})", user.username, user.id);
    start_session(&state.sessions, &user, &[clear_oauth_state_cookie()])
}
