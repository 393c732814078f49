use axum::{routing::get, Router};

use crate::backend::secrets::{list_secrets, submit_form, submit_secret};
use crate::backend::server::state::AppState;

/// `GET /secrets`, `GET/POST /submit`
pub fn configure_secret_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/secrets", get(list_secrets))
        .route("/submit", get(submit_form).post(submit_secret))
}
