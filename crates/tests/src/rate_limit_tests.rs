use axum::http::StatusCode;
use shared_types::Role;

use crate::common::{create_test_token, get_authed, get_from_ip, test_app_rate_limited};

#[tokio::test]
async fn requests_over_the_limit_return_429() {
    // Allow only 2 requests per 60s window
    let (app, _pool, _guard) = test_app_rate_limited(2).await;
    let token = create_test_token(Role::Owner);

    let (s1, _) = get_authed(&app, "/api/v1/properties", &token).await;
    assert_eq!(s1, StatusCode::OK, "First request should pass");

    let (s2, _) = get_authed(&app, "/api/v1/properties", &token).await;
    assert_eq!(s2, StatusCode::OK, "Second request should pass");

    let (s3, body) = get_authed(&app, "/api/v1/properties", &token).await;
    assert_eq!(s3, StatusCode::TOO_MANY_REQUESTS, "Third request should be limited");
    assert_eq!(body["kind"], "RateLimited");
}

#[tokio::test]
async fn clients_are_limited_independently() {
    // Allow only 1 request per client
    let (app, _pool, _guard) = test_app_rate_limited(1).await;
    let token = create_test_token(Role::Owner);

    let (s1, _) = get_from_ip(&app, "/api/v1/properties", &token, "203.0.113.9").await;
    assert_eq!(s1, StatusCode::OK);

    // A different client address has its own budget
    let (s2, _) = get_from_ip(&app, "/api/v1/properties", &token, "198.51.100.4").await;
    assert_eq!(s2, StatusCode::OK);

    let (s3, _) = get_from_ip(&app, "/api/v1/properties", &token, "203.0.113.9").await;
    assert_eq!(s3, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn health_is_not_rate_limited() {
    let (app, _pool, _guard) = test_app_rate_limited(1).await;
    let token = create_test_token(Role::Owner);

    // Exhaust the API budget for this client
    let (s1, _) = get_authed(&app, "/api/v1/properties", &token).await;
    assert_eq!(s1, StatusCode::OK);
    let (s2, _) = get_authed(&app, "/api/v1/properties", &token).await;
    assert_eq!(s2, StatusCode::TOO_MANY_REQUESTS);

    // The health probe sits outside the rate-limited API router
    let (s3, _) = crate::common::get(&app, "/health").await;
    assert_eq!(s3, StatusCode::OK);
}
