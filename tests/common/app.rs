//! Application fixture
//!
//! Builds the full router over a fresh `MemoryStore` and drives it with
//! `tower::ServiceExt::oneshot`, so tests exercise routing, extractors,
//! handlers and views together without a network or database.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use organize::backend::auth::google::GoogleOAuth;
use organize::backend::server::{build_app_with_oauth, ServerConfig};
use organize::backend::store::{MemoryStore, Store};
use organize::shared::User;

/// Configuration for tests: cheap bcrypt, fixed secret
pub fn test_config() -> ServerConfig {
    ServerConfig::default()
        .with_session_secret("test-session-secret")
        .with_bcrypt_cost(4)
        .with_request_timeout(Duration::from_secs(5))
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self::build(config, None)
    }

    pub fn with_oauth(oauth: GoogleOAuth) -> Self {
        Self::build(test_config(), Some(oauth))
    }

    fn build(config: ServerConfig, oauth: Option<GoogleOAuth>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = build_app_with_oauth(config, store.clone(), oauth)
            .expect("Failed to build test app");
        Self { router, store }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response {
        self.send(get_request(path, cookie)).await
    }

    pub async fn post_form(&self, path: &str, body: &str, cookie: Option<&str>) -> Response {
        self.send(form_request(path, body, cookie, None)).await
    }

    /// Register `username` and return its `session=...` cookie
    pub async fn register(&self, username: &str, password: &str) -> String {
        let body = format!("username={}&password={}", username, password);
        let response = self.post_form("/register", &body, None).await;
        session_cookie(&response).expect("registration did not set a session cookie")
    }

    /// Stored record for `username`
    pub async fn user(&self, username: &str) -> User {
        self.store
            .find_user_by_username(username)
            .await
            .expect("store error")
            .expect("no such user")
    }
}

pub fn get_request(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("valid request")
}

pub fn form_request(
    path: &str,
    body: &str,
    cookie: Option<&str>,
    referer: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    if let Some(referer) = referer {
        builder = builder.header(header::REFERER, referer);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// `name=value` of the first `Set-Cookie` for `name`
pub fn cookie_named(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{}=", name)))
        .map(str::to_string)
}

pub fn session_cookie(response: &Response) -> Option<String> {
    cookie_named(response, "session").filter(|c| c != "session=")
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("body is not UTF-8")
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).expect("body is not JSON")
}
