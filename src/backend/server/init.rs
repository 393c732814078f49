/**
 * Server Initialization
 *
 * Builds the Axum application from a [`ServerConfig`]:
 *
 * 1. Open the store (PostgreSQL, or in-memory when unavailable)
 * 2. Derive session keys and compile templates
 * 3. Set up Google sign-in if credentials are present
 * 4. Assemble the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::google::GoogleOAuth;
use crate::backend::auth::sessions::SessionKeys;
use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_store, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::Store;
use crate::backend::views::Views;

/// Create and configure the Axum application
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing Organize server");

    let store = load_store(&config).await;
    build_app(config, store)
}

/// Assemble the application around an existing store
///
/// Google sign-in is wired to the production endpoints; use
/// [`build_app_with_oauth`] to supply a differently configured client.
pub fn build_app(config: ServerConfig, store: Arc<dyn Store>) -> Result<Router<()>, BackendError> {
    let oauth = config.google.clone().map(GoogleOAuth::new);
    build_app_with_oauth(config, store, oauth)
}

pub fn build_app_with_oauth(
    config: ServerConfig,
    store: Arc<dyn Store>,
    oauth: Option<GoogleOAuth>,
) -> Result<Router<()>, BackendError> {
    let sessions = SessionKeys::new(&config.session_secret, config.session_ttl)
        .with_secure_cookies(config.secure_cookies);
    let views = Views::new()?;

    if oauth.is_some() {
        tracing::info!("Google sign-in enabled");
    } else {
        tracing::info!("Google sign-in not configured");
    }

    let app_state = AppState {
        store,
        sessions: Arc::new(sessions),
        views,
        oauth: oauth.map(Arc::new),
        config: Arc::new(config),
    };

    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}
