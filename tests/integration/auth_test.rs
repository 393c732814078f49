//! Registration, login, logout and session handling

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use pretty_assertions::assert_eq;

use organize::backend::store::Store;

use crate::assert_contains;
use crate::common::*;

#[tokio::test]
async fn test_register_signs_in_and_redirects_to_dashboard() {
    let app = TestApp::new();

    let response = app
        .post_form("/register", "username=carter&password=hunter2", None)
        .await;

    assert_redirect(&response, "/dashboard");
    let cookie = session_cookie(&response).expect("session cookie");
    assert_eq!(app.store.user_count().await, 1);

    let dashboard = app.get("/dashboard", Some(&cookie)).await;
    assert_status(&dashboard, StatusCode::OK);
    assert_contains!(body_text(dashboard).await, "carter");
}

#[tokio::test]
async fn test_duplicate_registration_is_conflict_and_writes_nothing() {
    let app = TestApp::new();
    app.register("carter", "first").await;

    let response = app
        .post_form("/register", "username=carter&password=second", None)
        .await;

    assert_status(&response, StatusCode::CONFLICT);
    assert!(session_cookie(&response).is_none());
    assert_eq!(app.store.user_count().await, 1);

    // The original password still works
    let login = app
        .post_form("/login", "username=carter&password=first", None)
        .await;
    assert_redirect(&login, "/dashboard");
}

fn raw_session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session="))
        .map(str::to_string)
        .expect("session Set-Cookie")
}

#[tokio::test]
async fn test_session_cookie_is_secure_when_configured() {
    let plain = TestApp::new();
    let response = plain
        .post_form("/register", "username=carter&password=pw", None)
        .await;
    assert!(!raw_session_cookie(&response).contains("Secure"));

    let secure = TestApp::with_config(test_config().with_secure_cookies(true));
    let response = secure
        .post_form("/register", "username=carter&password=pw", None)
        .await;
    let cookie = raw_session_cookie(&response);
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("; Secure"));
}

#[tokio::test]
async fn test_register_with_google_username_is_rejected() {
    let app = TestApp::new();
    let response = app
        .post_form("/register", "username=google-42&password=pw", None)
        .await;

    assert_status(&response, StatusCode::BAD_REQUEST);
    assert!(session_cookie(&response).is_none());
    assert_eq!(app.store.user_count().await, 0);
}

#[tokio::test]
async fn test_register_with_blank_password_is_bad_request() {
    let app = TestApp::new();
    let response = app
        .post_form("/register", "username=carter&password=", None)
        .await;

    assert_status(&response, StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(app.store.user_count().await, 0);
}

#[tokio::test]
async fn test_login_success_sets_session() {
    let app = TestApp::new();
    app.register("carter", "hunter2").await;

    let response = app
        .post_form("/login", "username=carter&password=hunter2", None)
        .await;

    assert_redirect(&response, "/dashboard");
    let cookie = session_cookie(&response).expect("session cookie");
    assert_status(&app.get("/dashboard", Some(&cookie)).await, StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.register("carter", "hunter2").await;

    let response = app
        .post_form("/login", "username=carter&password=nope", None)
        .await;

    assert_status(&response, StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn test_login_unknown_user_is_unauthorized() {
    let app = TestApp::new();
    let response = app
        .post_form("/login", "username=ghost&password=boo", None)
        .await;
    assert_status(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = TestApp::new();
    let cookie = app.register("carter", "hunter2").await;

    let response = app.get("/logout", Some(&cookie)).await;

    assert_redirect(&response, "/");
    assert_eq!(cookie_named(&response, "session").as_deref(), Some("session="));
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let app = TestApp::new();
    let cookie = app.register("carter", "hunter2").await;
    let token = cookie.trim_start_matches("session=");

    let request = Request::builder()
        .uri("/dashboard")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    assert_status(&app.send(request).await, StatusCode::OK);
}

#[tokio::test]
async fn test_forged_session_redirects_to_login() {
    let app = TestApp::new();
    let response = app
        .get("/dashboard", Some("session=eyJhbGciOiJIUzI1NiJ9.e30.forged"))
        .await;
    assert_redirect(&response, "/login");
}

#[tokio::test]
async fn test_session_from_other_secret_is_rejected() {
    let issuer = TestApp::with_config(test_config().with_session_secret("other-secret"));
    let cookie = issuer.register("carter", "hunter2").await;

    let app = TestApp::new();
    assert_redirect(&app.get("/dashboard", Some(&cookie)).await, "/login");
}

#[tokio::test]
async fn test_public_pages_render() {
    let app = TestApp::new();
    for path in ["/", "/login", "/register"] {
        let response = app.get(path, None).await;
        assert_status(&response, StatusCode::OK);
    }
    assert_contains!(body_text(app.get("/login", None).await).await, "/auth/google");
}

#[tokio::test]
async fn test_protected_paths_redirect_without_session() {
    let app = TestApp::new();
    for path in [
        "/dashboard",
        "/board/00000000-0000-0000-0000-000000000000",
        "/secrets",
        "/submit",
        "/logout",
    ] {
        assert_redirect(&app.get(path, None).await, "/login");
    }

    for (path, body) in [
        ("/dashboard", "boardName=Sneaky"),
        ("/updateList", "listID=x&listTitle=y"),
        ("/updateItem", "listID=x&itemID=y&itemTitle=t&itemContent=c"),
        ("/submit", "secret=psst"),
    ] {
        assert_redirect(&app.post_form(path, body, None).await, "/login");
    }

    assert_eq!(app.store.user_count().await, 0);
    assert!(app.store.users_with_secrets().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();
    assert_status(&app.get("/nope", None).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_files_are_served() {
    let app = TestApp::new();
    let response = app.get("/static/style.css", None).await;
    assert_status(&response, StatusCode::OK);
}
