/**
 * Application State Management
 *
 * `AppState` is the single state container handed to the router. The
 * `FromRef` implementations let a handler extract only the part it needs,
 * e.g. `State(views): State<Views>`.
 *
 * Everything inside is immutable or internally synchronized; cloning the
 * state clones a handful of `Arc`s.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::google::GoogleOAuth;
use crate::backend::auth::sessions::SessionKeys;
use crate::backend::server::config::ServerConfig;
use crate::backend::store::Store;
use crate::backend::views::Views;

#[derive(Clone)]
pub struct AppState {
    /// Data access, PostgreSQL or in-memory
    pub store: Arc<dyn Store>,

    /// Session token signing keys
    pub sessions: Arc<SessionKeys>,

    /// Compiled templates
    pub views: Views,

    /// Google sign-in, `None` when not configured
    pub oauth: Option<Arc<GoogleOAuth>>,

    pub config: Arc<ServerConfig>,
}

impl FromRef<AppState> for Arc<dyn Store> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<SessionKeys> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for Views {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.views.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
