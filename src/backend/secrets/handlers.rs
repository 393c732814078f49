/**
 * Secrets Handlers
 *
 * - `GET /secrets` - every secret users have submitted
 * - `GET /submit` - the submission form
 * - `POST /submit` - set the signed-in user's secret
 */

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use tera::Context;

use crate::backend::error::BackendError;
use crate::backend::middleware::CurrentUser;
use crate::backend::server::state::AppState;
use crate::shared::SharedError;

#[derive(Deserialize, Debug)]
pub struct SecretForm {
    #[serde(default)]
    pub secret: String,
}

pub async fn list_secrets(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, BackendError> {
    let users = state.store.users_with_secrets().await?;

    let mut context = Context::new();
    context.insert("current_user", &user);
    context.insert("users", &users);
    state.views.render("secrets.html", &context)
}

pub async fn submit_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, BackendError> {
    let mut context = Context::new();
    context.insert("current_user", &user);
    state.views.render("submit.html", &context)
}

/// Only the signed-in user's own record is ever written. A blank secret is
/// rejected; anything else is stored as submitted.
pub async fn submit_secret(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<SecretForm>,
) -> Result<Redirect, BackendError> {
    if form.secret.trim().is_empty() {
        return Err(SharedError::validation("secret", "Secret must not be empty").into());
    }

    state
        .store
        .set_user_secret(user.id, &form.secret)
        .await?
        .ok_or_else(|| BackendError::not_found("user", user.id))?;

    tracing::info!("User {} submitted a secret", user.id);
    Ok(Redirect::to("/secrets"))
}
