/**
 * Authentication Routes
 *
 * - `GET/POST /register`
 * - `GET/POST /login`
 * - `GET /logout`
 * - `GET /auth/google`, `GET /auth/google/secrets`
 */

use axum::{routing::get, Router};

use crate::backend::auth::handlers::{
    google_callback, google_redirect, login, login_page, logout, register, register_page,
};
use crate::backend::server::state::AppState;

pub fn configure_auth_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .route("/auth/google", get(google_redirect))
        .route("/auth/google/secrets", get(google_callback))
}
