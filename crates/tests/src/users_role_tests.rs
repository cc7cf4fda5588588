use axum::http::StatusCode;
use shared_types::Role;

use crate::common::{
    create_test_token, delete_authed, get, get_authed, put_json_authed, register_user, test_app,
};

#[tokio::test]
async fn user_listing_requires_authentication() {
    let (app, _pool, _guard) = test_app().await;

    let (status, response) = get(&app, "/api/v1/users").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["kind"], "Unauthorized");
}

#[tokio::test]
async fn user_listing_rejects_non_admin_roles() {
    let (app, _pool, _guard) = test_app().await;

    for role in [Role::Tenant, Role::Agent, Role::Owner] {
        let token = create_test_token(role);
        let (status, response) = get_authed(&app, "/api/v1/users", &token).await;
        assert_eq!(
            status,
            StatusCode::FORBIDDEN,
            "{} should not list users: {:?}",
            role.as_str(),
            response
        );
        assert_eq!(response["kind"], "Forbidden");
    }
}

#[tokio::test]
async fn user_listing_succeeds_as_admin() {
    let (app, _pool, _guard) = test_app().await;

    register_user(&app, "dmorris", "d.morris@example.com", "hunter2hunter2").await;

    let token = create_test_token(Role::Admin);
    let (status, response) = get_authed(&app, "/api/v1/users", &token).await;

    assert_eq!(status, StatusCode::OK, "{:?}", response);
    let usernames: Vec<&str> = response
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|u| u["username"].as_str())
        .collect();
    assert!(usernames.contains(&"fixture"));
    assert!(usernames.contains(&"dmorris"));
}

#[tokio::test]
async fn role_assignment_promotes_an_account() {
    let (app, _pool, _guard) = test_app().await;

    let created = register_user(&app, "dmorris", "d.morris@example.com", "hunter2hunter2").await;
    let user_id = created["user"]["id"].as_i64().unwrap();

    let token = create_test_token(Role::Admin);
    let body = serde_json::json!({ "role": "agent" });
    let (status, updated) = put_json_authed(
        &app,
        &format!("/api/v1/users/{}/role", user_id),
        &body.to_string(),
        &token,
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{:?}", updated);
    assert_eq!(updated["role"], "agent");

    // The change is durable
    let (status, fetched) =
        get_authed(&app, &format!("/api/v1/users/{}", user_id), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["role"], "agent");
}

#[tokio::test]
async fn role_assignment_rejects_self_change() {
    let (app, _pool, _guard) = test_app().await;

    // Fixture user is id 1, the same id the token is minted for
    let token = create_test_token(Role::Admin);
    let body = serde_json::json!({ "role": "tenant" });
    let (status, response) =
        put_json_authed(&app, "/api/v1/users/1/role", &body.to_string(), &token).await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{:?}", response);
    assert!(response["message"].as_str().unwrap().contains("own role"));
}

#[tokio::test]
async fn role_assignment_rejects_non_admins() {
    let (app, _pool, _guard) = test_app().await;

    let created = register_user(&app, "dmorris", "d.morris@example.com", "hunter2hunter2").await;
    let user_id = created["user"]["id"].as_i64().unwrap();

    let token = create_test_token(Role::Owner);
    let body = serde_json::json!({ "role": "agent" });
    let (status, _) = put_json_authed(
        &app,
        &format!("/api/v1/users/{}/role", user_id),
        &body.to_string(),
        &token,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn role_assignment_for_unknown_account_is_404() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Admin);
    let body = serde_json::json!({ "role": "agent" });
    let (status, _) =
        put_json_authed(&app, "/api/v1/users/99999/role", &body.to_string(), &token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deletion_removes_the_account() {
    let (app, _pool, _guard) = test_app().await;

    let created = register_user(&app, "shortlived", "short@example.com", "hunter2hunter2").await;
    let user_id = created["user"]["id"].as_i64().unwrap();

    let token = create_test_token(Role::Admin);
    let (status, _) = delete_authed(&app, &format!("/api/v1/users/{}", user_id), &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get_authed(&app, &format!("/api/v1/users/{}", user_id), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deletion_rejects_self_deletion() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Admin);
    let (status, response) = delete_authed(&app, "/api/v1/users/1", &token).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["message"].as_str().unwrap().contains("own account"));
}

#[tokio::test]
async fn deletion_rejects_non_admins() {
    let (app, _pool, _guard) = test_app().await;

    let created = register_user(&app, "dmorris", "d.morris@example.com", "hunter2hunter2").await;
    let user_id = created["user"]["id"].as_i64().unwrap();

    let token = create_test_token(Role::Agent);
    let (status, _) = delete_authed(&app, &format!("/api/v1/users/{}", user_id), &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
