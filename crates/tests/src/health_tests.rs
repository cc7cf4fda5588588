use axum::http::StatusCode;

use crate::common::{get, test_app};

#[tokio::test]
async fn health_check_reports_ok_with_database() {
    let (app, _pool, _guard) = test_app().await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "connected");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn health_check_needs_no_authentication() {
    let (app, _pool, _guard) = test_app().await;

    // Same endpoint without any credentials, still 200
    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}
