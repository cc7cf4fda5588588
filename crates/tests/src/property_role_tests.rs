use axum::http::StatusCode;
use shared_types::Role;

use crate::common::{
    create_test_property, create_test_token, delete_authed, get, get_authed, post_json_authed,
    put_json_authed, test_app,
};

#[tokio::test]
async fn portfolio_requires_authentication() {
    let (app, _pool, _guard) = test_app().await;

    let (status, response) = get(&app, "/api/v1/properties").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["kind"], "Unauthorized");
}

#[tokio::test]
async fn tenants_cannot_view_the_portfolio() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Tenant);
    let (status, response) = get_authed(&app, "/api/v1/properties", &token).await;

    assert_eq!(status, StatusCode::FORBIDDEN, "{:?}", response);
    assert_eq!(response["kind"], "Forbidden");
    // The denial names the admitted roles
    let message = response["message"].as_str().unwrap();
    assert!(message.contains("admin"), "{message}");
    assert!(message.contains("owner"), "{message}");
    assert!(message.contains("agent"), "{message}");
}

#[tokio::test]
async fn all_staff_roles_can_view_the_portfolio() {
    let (app, _pool, _guard) = test_app().await;

    for role in [Role::Admin, Role::Owner, Role::Agent] {
        let token = create_test_token(role);
        let (status, response) = get_authed(&app, "/api/v1/properties", &token).await;
        assert_eq!(
            status,
            StatusCode::OK,
            "{} should view the portfolio: {:?}",
            role.as_str(),
            response
        );
        assert!(response.is_array());
    }
}

#[tokio::test]
async fn agents_cannot_create_properties() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Agent);
    let body = serde_json::json!({
        "name": "Maple Court",
        "address_line": "12 Maple St",
        "city": "Portland",
        "state": "OR",
        "postal_code": "97201",
        "property_type": "apartment",
        "unit_count": 10,
    });
    let (status, response) =
        post_json_authed(&app, "/api/v1/properties", &body.to_string(), &token).await;

    assert_eq!(status, StatusCode::FORBIDDEN, "{:?}", response);
}

#[tokio::test]
async fn owners_can_create_properties() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Owner);
    let created = create_test_property(&app, &token, "Maple Court", 10).await;

    assert_eq!(created["name"], "Maple Court");
    assert_eq!(created["unit_count"], 10);
    assert_eq!(created["occupied_count"], 0);
    assert_eq!(created["status"], "active");
    assert!(created["id"].is_string());
}

#[tokio::test]
async fn creation_rejects_unknown_property_types() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Owner);
    let body = serde_json::json!({
        "name": "Maple Court",
        "address_line": "12 Maple St",
        "city": "Portland",
        "state": "OR",
        "postal_code": "97201",
        "property_type": "castle",
        "unit_count": 10,
    });
    let (status, response) =
        post_json_authed(&app, "/api/v1/properties", &body.to_string(), &token).await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{:?}", response);
    assert_eq!(response["kind"], "BadRequest");
}

#[tokio::test]
async fn creation_validates_the_payload() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Owner);
    let body = serde_json::json!({
        "name": "",
        "address_line": "12 Maple St",
        "city": "Portland",
        "state": "ORE",
        "postal_code": "97201",
        "property_type": "apartment",
        "unit_count": 0,
    });
    let (status, response) =
        post_json_authed(&app, "/api/v1/properties", &body.to_string(), &token).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{:?}", response);
    assert!(response["field_errors"]["name"].is_string());
    assert!(response["field_errors"]["state"].is_string());
    assert!(response["field_errors"]["unit_count"].is_string());
}

#[tokio::test]
async fn single_property_lookup_returns_the_record() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Owner);
    let created = create_test_property(&app, &token, "Maple Court", 10).await;
    let id = created["id"].as_str().unwrap();

    let (status, fetched) =
        get_authed(&app, &format!("/api/v1/properties/{}", id), &token).await;

    assert_eq!(status, StatusCode::OK, "{:?}", fetched);
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["name"], "Maple Court");
}

#[tokio::test]
async fn malformed_property_ids_are_rejected() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Agent);
    let (status, response) =
        get_authed(&app, "/api/v1/properties/not-a-uuid", &token).await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{:?}", response);
}

#[tokio::test]
async fn unknown_property_is_404() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Agent);
    let missing = uuid::Uuid::new_v4();
    let (status, _) =
        get_authed(&app, &format!("/api/v1/properties/{}", missing), &token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_changes_the_record() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Owner);
    let created = create_test_property(&app, &token, "Maple Court", 10).await;
    let id = created["id"].as_str().unwrap();

    let body = serde_json::json!({
        "name": "Maple Court East",
        "address_line": "12 Maple St",
        "city": "Portland",
        "state": "OR",
        "postal_code": "97201",
        "property_type": "apartment",
        "unit_count": 10,
        "occupied_count": 4,
        "status": "archived",
    });
    let (status, updated) = put_json_authed(
        &app,
        &format!("/api/v1/properties/{}", id),
        &body.to_string(),
        &token,
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{:?}", updated);
    assert_eq!(updated["name"], "Maple Court East");
    assert_eq!(updated["occupied_count"], 4);
    assert_eq!(updated["status"], "archived");
}

#[tokio::test]
async fn update_rejects_occupancy_above_unit_count() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Owner);
    let created = create_test_property(&app, &token, "Maple Court", 10).await;
    let id = created["id"].as_str().unwrap();

    let body = serde_json::json!({
        "name": "Maple Court",
        "address_line": "12 Maple St",
        "city": "Portland",
        "state": "OR",
        "postal_code": "97201",
        "property_type": "apartment",
        "unit_count": 10,
        "occupied_count": 12,
        "status": "active",
    });
    let (status, response) = put_json_authed(
        &app,
        &format!("/api/v1/properties/{}", id),
        &body.to_string(),
        &token,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{:?}", response);
    assert!(response["message"].as_str().unwrap().contains("unit count"));
}

#[tokio::test]
async fn update_rejects_unknown_status() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Owner);
    let created = create_test_property(&app, &token, "Maple Court", 10).await;
    let id = created["id"].as_str().unwrap();

    let body = serde_json::json!({
        "name": "Maple Court",
        "address_line": "12 Maple St",
        "city": "Portland",
        "state": "OR",
        "postal_code": "97201",
        "property_type": "apartment",
        "unit_count": 10,
        "occupied_count": 0,
        "status": "paused",
    });
    let (status, _) = put_json_authed(
        &app,
        &format!("/api/v1/properties/{}", id),
        &body.to_string(),
        &token,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn agents_cannot_delete_properties() {
    let (app, _pool, _guard) = test_app().await;

    let owner = create_test_token(Role::Owner);
    let created = create_test_property(&app, &owner, "Maple Court", 10).await;
    let id = created["id"].as_str().unwrap();

    let agent = create_test_token(Role::Agent);
    let (status, _) =
        delete_authed(&app, &format!("/api/v1/properties/{}", id), &agent).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn deletion_removes_the_property() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Owner);
    let created = create_test_property(&app, &token, "Maple Court", 10).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) =
        delete_authed(&app, &format!("/api/v1/properties/{}", id), &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) =
        get_authed(&app, &format!("/api/v1/properties/{}", id), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unversioned_alias_serves_the_same_routes() {
    std::env::set_var("API_ENABLE_UNVERSIONED", "true");
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Owner);
    let (status, response) = get_authed(&app, "/api/properties", &token).await;

    assert_eq!(status, StatusCode::OK, "{:?}", response);
}
