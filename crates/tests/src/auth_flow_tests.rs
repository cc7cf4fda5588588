use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use shared_types::Role;

use crate::common::{
    create_test_token, get, get_authed, post_json, post_json_authed, register_user, test_app,
};

#[tokio::test]
async fn register_creates_a_tenant_account() {
    let (app, _pool, _guard) = test_app().await;

    let response = register_user(&app, "mwalker", "m.walker@example.com", "hunter2hunter2").await;

    assert_eq!(response["user"]["username"], "mwalker");
    assert_eq!(response["user"]["role"], "tenant");
    assert!(response["access_token"].as_str().unwrap_or("").len() > 20);
    assert!(response["refresh_token"].as_str().unwrap_or("").len() > 20);

    // The issued access token identifies the new account
    let token = response["access_token"].as_str().unwrap();
    let (status, me) = get_authed(&app, "/api/v1/auth/me", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "m.walker@example.com");
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let (app, _pool, _guard) = test_app().await;

    register_user(&app, "first", "taken@example.com", "hunter2hunter2").await;

    let body = serde_json::json!({
        "username": "second",
        "email": "taken@example.com",
        "display_name": "Second",
        "password": "hunter2hunter2",
    });
    let (status, response) =
        post_json(&app, "/api/v1/auth/register", &body.to_string()).await;

    assert_eq!(status, StatusCode::CONFLICT, "{:?}", response);
    assert_eq!(response["kind"], "Conflict");
    assert!(response["message"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn register_rejects_duplicate_username() {
    let (app, _pool, _guard) = test_app().await;

    register_user(&app, "taken", "one@example.com", "hunter2hunter2").await;

    let body = serde_json::json!({
        "username": "taken",
        "email": "two@example.com",
        "display_name": "Two",
        "password": "hunter2hunter2",
    });
    let (status, response) =
        post_json(&app, "/api/v1/auth/register", &body.to_string()).await;

    assert_eq!(status, StatusCode::CONFLICT, "{:?}", response);
    assert!(response["message"].as_str().unwrap().contains("username"));
}

#[tokio::test]
async fn register_validates_the_payload() {
    let (app, _pool, _guard) = test_app().await;

    let body = serde_json::json!({
        "username": "ab",
        "email": "not-an-email",
        "display_name": "",
        "password": "short",
    });
    let (status, response) =
        post_json(&app, "/api/v1/auth/register", &body.to_string()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{:?}", response);
    assert_eq!(response["kind"], "ValidationError");
    assert!(response["field_errors"]["password"].is_string());
    assert!(response["field_errors"]["email"].is_string());
    assert!(response["field_errors"]["username"].is_string());
}

#[tokio::test]
async fn login_returns_a_token_pair() {
    let (app, _pool, _guard) = test_app().await;

    register_user(&app, "lvasquez", "l.vasquez@example.com", "hunter2hunter2").await;

    let body = serde_json::json!({
        "email": "l.vasquez@example.com",
        "password": "hunter2hunter2",
    });
    let (status, response) = post_json(&app, "/api/v1/auth/login", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK, "{:?}", response);
    assert_eq!(response["user"]["username"], "lvasquez");
    assert!(response["access_token"].is_string());
    assert!(response["refresh_token"].is_string());
}

#[tokio::test]
async fn login_rejects_a_wrong_password() {
    let (app, _pool, _guard) = test_app().await;

    register_user(&app, "lvasquez", "l.vasquez@example.com", "hunter2hunter2").await;

    let body = serde_json::json!({
        "email": "l.vasquez@example.com",
        "password": "wrong-password-entirely",
    });
    let (status, response) = post_json(&app, "/api/v1/auth/login", &body.to_string()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["message"], "Incorrect email or password");
}

#[tokio::test]
async fn login_does_not_reveal_unknown_emails() {
    let (app, _pool, _guard) = test_app().await;

    let body = serde_json::json!({
        "email": "nobody@example.com",
        "password": "hunter2hunter2",
    });
    let (status, response) = post_json(&app, "/api/v1/auth/login", &body.to_string()).await;

    // Identical to the wrong-password response
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["message"], "Incorrect email or password");
}

#[tokio::test]
async fn refresh_rotates_the_token_pair() {
    let (app, _pool, _guard) = test_app().await;

    let initial = register_user(&app, "rotator", "rotator@example.com", "hunter2hunter2").await;
    let old_refresh = initial["refresh_token"].as_str().unwrap();

    let body = serde_json::json!({ "refresh_token": old_refresh });
    let (status, rotated) = post_json(&app, "/api/v1/auth/refresh", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK, "{:?}", rotated);
    assert_ne!(rotated["refresh_token"].as_str().unwrap(), old_refresh);
    assert!(rotated["access_token"].is_string());
}

#[tokio::test]
async fn refresh_replay_is_rejected() {
    let (app, _pool, _guard) = test_app().await;

    let initial = register_user(&app, "rotator", "rotator@example.com", "hunter2hunter2").await;
    let old_refresh = initial["refresh_token"].as_str().unwrap();

    let body = serde_json::json!({ "refresh_token": old_refresh });
    let (status, _) = post_json(&app, "/api/v1/auth/refresh", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    // The same token a second time: revoked on first use
    let (status, response) = post_json(&app, "/api/v1/auth/refresh", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "{:?}", response);
}

#[tokio::test]
async fn refresh_rejects_an_access_token() {
    let (app, _pool, _guard) = test_app().await;

    let initial = register_user(&app, "confused", "confused@example.com", "hunter2hunter2").await;
    let access = initial["access_token"].as_str().unwrap();

    // Presenting the short-lived access token in the refresh slot must fail
    let body = serde_json::json!({ "refresh_token": access });
    let (status, _) = post_json(&app, "/api/v1/auth/refresh", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_refresh_tokens() {
    let (app, _pool, _guard) = test_app().await;

    let initial = register_user(&app, "leaver", "leaver@example.com", "hunter2hunter2").await;
    let access = initial["access_token"].as_str().unwrap();
    let refresh = initial["refresh_token"].as_str().unwrap();

    let (status, _) = post_json_authed(&app, "/api/v1/auth/logout", "", access).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let body = serde_json::json!({ "refresh_token": refresh });
    let (status, _) = post_json(&app, "/api/v1/auth/refresh", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_requires_authentication() {
    let (app, _pool, _guard) = test_app().await;

    let (status, response) = get(&app, "/api/v1/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["kind"], "Unauthorized");
}

#[tokio::test]
async fn me_returns_the_token_owner() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Tenant);
    let (status, me) = get_authed(&app, "/api/v1/auth/me", &token).await;

    assert_eq!(status, StatusCode::OK, "{:?}", me);
    assert_eq!(me["username"], "fixture");
    assert_eq!(me["role"], "tenant");
}
