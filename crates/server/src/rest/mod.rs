pub mod auth;
pub mod property;
pub mod users;

use axum::routing::{get, post, put};
use axum::Router;

use crate::db::AppState;

/// All v1 API routes (paths are relative, no /api prefix).
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        // Users (admin console)
        .route("/users", get(users::list_users))
        .route(
            "/users/{id}",
            get(users::get_user).delete(users::delete_user),
        )
        .route("/users/{id}/role", put(users::set_user_role))
        // Portfolio
        .route(
            "/properties",
            get(property::list_properties).post(property::create_property),
        )
        .route(
            "/properties/{id}",
            get(property::get_property)
                .put(property::update_property)
                .delete(property::delete_property),
        )
        // Dashboard
        .route("/dashboard/stats", get(property::dashboard_stats))
}

/// Build the REST API router with all resource routes.
pub fn api_router() -> Router<AppState> {
    let mut router = Router::new().nest("/api/v1", api_v1_routes());

    // Backward-compat: unversioned /api/* alias (controlled by env var)
    if std::env::var("API_ENABLE_UNVERSIONED")
        .unwrap_or_else(|_| "true".to_string())
        .parse::<bool>()
        .unwrap_or(true)
    {
        router = router.nest("/api", api_v1_routes());
    }

    router
}

/// Build the REST API router with rate limiting applied.
pub fn api_router_with_rate_limit(
    rate_limit: crate::rate_limit::RateLimitState,
) -> Router<AppState> {
    api_router().layer(axum::middleware::from_fn_with_state(
        rate_limit,
        crate::rate_limit::rate_limit_middleware,
    ))
}
