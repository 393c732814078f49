/**
 * Router Configuration
 *
 * Combines every route group into one Axum router:
 *
 * 1. Board routes (landing page, dashboard, boards, list/item updates)
 * 2. Auth routes (register, login, logout, Google sign-in)
 * 3. Secret routes
 * 4. Static files under `/static`
 * 5. Fallback: 404
 *
 * Requests are traced with `tower_http::trace::TraceLayer`.
 */

use axum::{http::StatusCode, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::backend::routes::auth_routes::configure_auth_routes;
use crate::backend::routes::board_routes::configure_board_routes;
use crate::backend::routes::secret_routes::configure_secret_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();

    let router = configure_board_routes(router);
    let router = configure_auth_routes(router);
    let router = configure_secret_routes(router);

    // Add static file serving
    let router = router.nest_service("/static", ServeDir::new(&app_state.config.static_dir));

    // Fallback handler for 404
    let router = router.fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") });

    router.layer(TraceLayer::new_for_http()).with_state(app_state)
}
