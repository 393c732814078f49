/**
 * Login Handler
 *
 * `GET /login` renders the form; `POST /login` checks the credentials and,
 * on success, sets the session cookie and redirects to `/dashboard`.
 *
 * # Security
 *
 * - Passwords are verified using bcrypt
 * - Unknown users and wrong passwords both return 401 Unauthorized
 */

use axum::{
    extract::State,
    response::{Html, Response},
    Form,
};
use tera::Context;

use crate::backend::auth::handlers::types::CredentialsForm;
use crate::backend::auth::sessions::{redirect_with_cookies, SessionKeys};
use crate::backend::auth::users::authenticate;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::User;

/// Render the login form
pub async fn login_page(State(state): State<AppState>) -> Result<Html<String>, BackendError> {
    state.views.render("login.html", &Context::new())
}

/// Login handler
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, BackendError> {
    tracing::info!("Login request for: {}", form.username);

    let user = authenticate(state.store.as_ref(), &form.username, &form.password).await?;

    tracing::info!("User logged in successfully: {}", user.username);
    start_session(&state.sessions, &user, &[])
}

/// Issue a session for `user` and redirect to the dashboard
///
/// `extra_cookies` are set on the same response.
pub(crate) fn start_session(
    keys: &SessionKeys,
    user: &User,
    extra_cookies: &[String],
) -> Result<Response, BackendError> {
    let token = keys.create_token(user)?;
    let mut cookies = vec![keys.cookie_for(&token)];
    cookies.extend_from_slice(extra_cookies);
    redirect_with_cookies("/dashboard", &cookies)
}
