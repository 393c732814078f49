/**
 * Authentication Extractor
 *
 * Resolves the session token (cookie or bearer header) into a user.
 * Protected handlers take a [`CurrentUser`] argument; a request without a
 * valid session never reaches the handler body and is redirected to
 * `/login` instead.
 */

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};

use crate::backend::auth::sessions::{session_token, SessionKeys};
use crate::backend::server::state::AppState;
use crate::shared::{User, UserId};

/// The user a request's session token names, if the token is valid
pub fn current_identity(headers: &HeaderMap, keys: &SessionKeys) -> Option<UserId> {
    let token = session_token(headers)?;
    match keys.verify_token(&token) {
        Ok(claims) => claims.user_id(),
        Err(e) => {
            tracing::warn!("Invalid session token: {:?}", e);
            None
        }
    }
}

/// The signed-in user, loaded from the store
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(user_id) = current_identity(&parts.headers, &state.sessions) else {
            tracing::debug!("No session for {}, redirecting to /login", parts.uri.path());
            return Err(Redirect::to("/login").into_response());
        };

        match state.store.find_user(user_id).await {
            Ok(Some(user)) => Ok(CurrentUser(user)),
            Ok(None) => {
                tracing::warn!("Session names unknown user {}", user_id);
                Err(Redirect::to("/login").into_response())
            }
            Err(e) => {
                tracing::error!("Failed to load session user {}: {:?}", user_id, e);
                Err(crate::backend::error::BackendError::from(e).into_response())
            }
        }
    }
}
