/**
 * Logout Handler
 *
 * Sessions are stateless tokens, so ending one means expiring the cookie.
 */

use axum::response::Response;

use crate::backend::auth::sessions::{clear_session_cookie, redirect_with_cookies};
use crate::backend::error::BackendError;
use crate::backend::middleware::CurrentUser;

pub async fn logout(CurrentUser(user): CurrentUser) -> Result<Response, BackendError> {
    tracing::info!("User logged out: {}", user.username);
    redirect_with_cookies("/", &[clear_session_cookie()])
}
