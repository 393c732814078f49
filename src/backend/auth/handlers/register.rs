/**
 * Registration Handler
 *
 * `POST /register` creates a local account and signs it in. A taken
 * username fails with 409 and writes nothing.
 */

use axum::{
    extract::State,
    response::{Html, Response},
    Form,
};
use tera::Context;

use crate::backend::auth::handlers::login::start_session;
use crate::backend::auth::handlers::types::CredentialsForm;
use crate::backend::auth::users::register_user;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Render the registration form
pub async fn register_page(State(state): State<AppState>) -> Result<Html<String>, BackendError> {
    state.views.render("register.html", &Context::new())
}

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, BackendError> {
    tracing::info!("Registration request for: {}", form.username);

    let user = register_user(
        state.store.as_ref(),
        &form.username,
        &form.password,
        state.config.bcrypt_cost,
    )
    .await?;

    start_session(&state.sessions, &user, &[])
}
