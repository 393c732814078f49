//! Google sign-in against a mocked provider

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use wiremock::MockServer;

use organize::backend::store::Store;
use organize::shared::User;

use crate::common::google::{client_for, mount_rejecting_token, mount_sign_in};
use crate::common::*;

/// Start sign-in and return the `oauth_state=...` cookie pair
async fn begin(app: &TestApp) -> String {
    let response = app.get("/auth/google", None).await;
    assert_status(&response, StatusCode::SEE_OTHER);
    cookie_named(&response, "oauth_state").expect("state cookie")
}

fn state_value(cookie: &str) -> &str {
    cookie.trim_start_matches("oauth_state=")
}

#[tokio::test]
async fn test_unconfigured_sign_in_is_unavailable() {
    let app = TestApp::new();

    let start = app.get("/auth/google", None).await;
    assert_status(&start, StatusCode::SERVICE_UNAVAILABLE);

    let callback = app.get("/auth/google/secrets?code=x&state=y", None).await;
    assert_status(&callback, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_redirect_targets_consent_screen() {
    let server = MockServer::start().await;
    let app = TestApp::with_oauth(client_for(&server));

    let response = app.get("/auth/google", None).await;

    assert_status(&response, StatusCode::SEE_OTHER);
    let target = location(&response);
    let cookie = cookie_named(&response, "oauth_state").expect("state cookie");
    assert!(target.starts_with(&format!("{}/o/oauth2/v2/auth?", server.uri())));
    assert!(target.contains("client_id=test-client"));
    assert!(target.contains("response_type=code"));
    assert!(target.contains(&format!("state={}", state_value(&cookie))));
}

#[tokio::test]
async fn test_callback_signs_in_and_reuses_account() {
    let server = MockServer::start().await;
    mount_sign_in(&server, "good-code", "10769150350006150715", "carter@example.com").await;
    let app = TestApp::with_oauth(client_for(&server));

    let cookie = begin(&app).await;
    let path = format!(
        "/auth/google/secrets?code=good-code&state={}",
        state_value(&cookie)
    );
    let response = app.get(&path, Some(&cookie)).await;

    assert_redirect(&response, "/dashboard");
    let session = session_cookie(&response).expect("session cookie");
    let user = app.user("google-10769150350006150715").await;
    assert_eq!(user.email.as_deref(), Some("carter@example.com"));
    assert_eq!(user.password_hash, None);

    let dashboard = app.get("/dashboard", Some(&session)).await;
    assert_status(&dashboard, StatusCode::OK);

    let again = begin(&app).await;
    let path = format!(
        "/auth/google/secrets?code=good-code&state={}",
        state_value(&again)
    );
    assert_redirect(&app.get(&path, Some(&again)).await, "/dashboard");
    assert_eq!(app.store.user_count().await, 1);
}

#[tokio::test]
async fn test_username_collision_returns_to_login() {
    let server = MockServer::start().await;
    mount_sign_in(&server, "good-code", "42", "a@example.com").await;
    let app = TestApp::with_oauth(client_for(&server));
    let squatter = app
        .store
        .insert_user(User::local("google-42", "hash"))
        .await
        .unwrap();

    let cookie = begin(&app).await;
    let path = format!(
        "/auth/google/secrets?code=good-code&state={}",
        state_value(&cookie)
    );
    let response = app.get(&path, Some(&cookie)).await;

    assert_redirect(&response, "/login");
    assert!(session_cookie(&response).is_none());
    assert_eq!(app.store.user_count().await, 1);
    assert_eq!(app.user("google-42").await.id, squatter.id);
}

#[tokio::test]
async fn test_state_mismatch_returns_to_login() {
    let server = MockServer::start().await;
    mount_sign_in(&server, "good-code", "42", "a@example.com").await;
    let app = TestApp::with_oauth(client_for(&server));

    let cookie = begin(&app).await;
    let response = app
        .get("/auth/google/secrets?code=good-code&state=forged", Some(&cookie))
        .await;

    assert_redirect(&response, "/login");
    assert!(session_cookie(&response).is_none());
    assert_eq!(app.store.user_count().await, 0);
}

#[tokio::test]
async fn test_missing_state_cookie_returns_to_login() {
    let server = MockServer::start().await;
    let app = TestApp::with_oauth(client_for(&server));

    let response = app
        .get("/auth/google/secrets?code=good-code&state=abc", None)
        .await;
    assert_redirect(&response, "/login");
}

#[tokio::test]
async fn test_rejected_code_returns_to_login() {
    let server = MockServer::start().await;
    mount_rejecting_token(&server).await;
    let app = TestApp::with_oauth(client_for(&server));

    let cookie = begin(&app).await;
    let path = format!(
        "/auth/google/secrets?code=stale&state={}",
        state_value(&cookie)
    );
    let response = app.get(&path, Some(&cookie)).await;

    assert_redirect(&response, "/login");
    assert_eq!(app.store.user_count().await, 0);
}

#[tokio::test]
async fn test_declined_consent_returns_to_login() {
    let server = MockServer::start().await;
    let app = TestApp::with_oauth(client_for(&server));

    let cookie = begin(&app).await;
    let path = format!(
        "/auth/google/secrets?error=access_denied&state={}",
        state_value(&cookie)
    );
    let response = app.get(&path, Some(&cookie)).await;

    assert_redirect(&response, "/login");
}
