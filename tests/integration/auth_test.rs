//! Integration tests for the authentication flow.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_signup_login_and_me() {
    let app = TestApp::new().await;
    let token = app.signup_and_login("alice").await;

    let me = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["username"], "alice");
    assert_eq!(me.body["data"]["email"], "alice@example.com");
    assert!(me.body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let app = TestApp::new().await;
    app.signup_and_login("alice").await;

    let again = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({ "username": "alice2", "email": "ALICE@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.body["message"], "Account already exists");
}

#[tokio::test]
async fn test_weak_password_and_bad_email_rejected() {
    let app = TestApp::new().await;

    let weak = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({ "username": "bob", "email": "bob@example.com", "password": "password" })),
            None,
        )
        .await;
    assert_eq!(weak.status, StatusCode::UNPROCESSABLE_ENTITY);

    let bad_email = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({ "username": "bob", "email": "bob", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.signup_and_login("alice").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "alice@example.com", "password": "wrong-password" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_payload_shape() {
    let app = TestApp::new().await;
    app.signup_and_login("alice").await;

    let tokens = app.login("alice@example.com").await;
    assert_eq!(tokens["token_type"], "bearer");
    assert!(tokens["expires_in"].as_i64().unwrap() > 0);
    assert!(tokens["refresh_token"].is_string());
}

#[tokio::test]
async fn test_requires_bearer_token() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/api/contacts", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app.request("GET", "/api/contacts", None, Some("not-a-jwt")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotation_and_reuse() {
    let app = TestApp::new().await;
    app.signup_and_login("alice").await;
    let first = app.login("alice@example.com").await;
    let old_refresh = first["refresh_token"].as_str().unwrap();

    let rotated = app
        .request("POST", "/api/auth/refresh", Some(json!({ "refresh_token": old_refresh })), None)
        .await;
    assert_eq!(rotated.status, StatusCode::OK);

    // an access token is not a refresh token
    let access = first["access_token"].as_str().unwrap();
    let wrong_type = app
        .request("POST", "/api/auth/refresh", Some(json!({ "refresh_token": access })), None)
        .await;
    assert_eq!(wrong_type.status, StatusCode::UNAUTHORIZED);

    let reused = app
        .request("POST", "/api/auth/refresh", Some(json!({ "refresh_token": old_refresh })), None)
        .await;
    assert_eq!(reused.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_access_token() {
    let app = TestApp::new().await;
    let token = app.signup_and_login("alice").await;

    let logout = app.request("POST", "/api/auth/logout", None, Some(&token)).await;
    assert_eq!(logout.status, StatusCode::OK);

    let after = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "memory: ok");
    assert_eq!(response.body["data"]["storage"], "local: ok");
}
