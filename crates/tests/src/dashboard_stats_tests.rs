use axum::http::StatusCode;
use shared_types::Role;

use crate::common::{
    create_test_property, create_test_token, get, get_authed, put_json_authed, test_app,
};

#[tokio::test]
async fn stats_require_authentication() {
    let (app, _pool, _guard) = test_app().await;

    let (status, _) = get(&app, "/api/v1/dashboard/stats").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn stats_reject_tenants() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Tenant);
    let (status, response) = get_authed(&app, "/api/v1/dashboard/stats", &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{:?}", response);
}

#[tokio::test]
async fn stats_start_at_zero_on_an_empty_portfolio() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Owner);
    let (status, stats) = get_authed(&app, "/api/v1/dashboard/stats", &token).await;

    assert_eq!(status, StatusCode::OK, "{:?}", stats);
    assert_eq!(stats["total_properties"], 0);
    assert_eq!(stats["total_units"], 0);
    assert_eq!(stats["occupied_units"], 0);
    // The fixture account always exists
    assert!(stats["total_users"].as_i64().unwrap() >= 1);
    assert_eq!(stats["recent_properties"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn stats_aggregate_the_active_portfolio() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(Role::Owner);
    let first = create_test_property(&app, &token, "Maple Court", 10).await;
    let second = create_test_property(&app, &token, "Birchwood Duplex", 4).await;

    // Fill three units of the first property
    let body = serde_json::json!({
        "name": "Maple Court",
        "address_line": "12 Maple St",
        "city": "Portland",
        "state": "OR",
        "postal_code": "97201",
        "property_type": "apartment",
        "unit_count": 10,
        "occupied_count": 3,
        "status": "active",
    });
    let (status, _) = put_json_authed(
        &app,
        &format!("/api/v1/properties/{}", first["id"].as_str().unwrap()),
        &body.to_string(),
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Archive the second so its units drop out of the totals
    let body = serde_json::json!({
        "name": "Birchwood Duplex",
        "address_line": "12 Maple St",
        "city": "Portland",
        "state": "OR",
        "postal_code": "97201",
        "property_type": "apartment",
        "unit_count": 4,
        "occupied_count": 0,
        "status": "archived",
    });
    let (status, _) = put_json_authed(
        &app,
        &format!("/api/v1/properties/{}", second["id"].as_str().unwrap()),
        &body.to_string(),
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, stats) = get_authed(&app, "/api/v1/dashboard/stats", &token).await;
    assert_eq!(status, StatusCode::OK, "{:?}", stats);

    // Property count covers the whole portfolio; unit sums only active ones
    assert_eq!(stats["total_properties"], 2);
    assert_eq!(stats["total_units"], 10);
    assert_eq!(stats["occupied_units"], 3);
    assert_eq!(stats["recent_properties"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn stats_are_visible_to_every_staff_role() {
    let (app, _pool, _guard) = test_app().await;

    for role in [Role::Admin, Role::Owner, Role::Agent] {
        let token = create_test_token(role);
        let (status, response) = get_authed(&app, "/api/v1/dashboard/stats", &token).await;
        assert_eq!(
            status,
            StatusCode::OK,
            "{} should read stats: {:?}",
            role.as_str(),
            response
        );
    }
}
