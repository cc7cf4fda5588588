use axum::Router;
use shared_types::{
    AppError, AppErrorKind, AuthResponse, AuthUser, ChangePasswordRequest, CreatePropertyRequest,
    DashboardStats, LoginRequest, MessageResponse, Property, RefreshRequest, RegisterRequest, Role,
    SetRoleRequest, UpdateProfileRequest, UpdatePropertyRequest, User,
};
use sqlx::{Pool, Postgres};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health;
use crate::rest;

/// Everything the REST surface exposes, collected into one document for
/// the `/docs` viewer.
#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        rest::auth::register,
        rest::auth::login,
        rest::auth::refresh,
        rest::auth::logout,
        rest::auth::me,
        // Users
        rest::users::list_users,
        rest::users::get_user,
        rest::users::set_user_role,
        rest::users::delete_user,
        // Portfolio
        rest::property::list_properties,
        rest::property::create_property,
        rest::property::get_property,
        rest::property::update_property,
        rest::property::delete_property,
        rest::property::dashboard_stats,
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind, MessageResponse,
        Role, User, AuthUser,
        LoginRequest, RegisterRequest, RefreshRequest, AuthResponse,
        UpdateProfileRequest, ChangePasswordRequest, SetRoleRequest,
        Property, CreatePropertyRequest, UpdatePropertyRequest, DashboardStats,
        health::HealthResponse,
    )),
    tags(
        (name = "auth", description = "Registration, sign-in and session management"),
        (name = "users", description = "User account administration"),
        (name = "properties", description = "Portfolio management endpoints"),
        (name = "dashboard", description = "Portfolio statistics"),
        (name = "health", description = "Liveness probe")
    ),
    info(
        title = "Keystead API",
        description = "Property management portal API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Assemble the public HTTP surface: the rate-limited REST API, the
/// liveness probe, and the Scalar viewer at `/docs`.
///
/// `/health` sits outside the limited router so probes are never throttled.
pub fn api_router(pool: Pool<Postgres>) -> Router {
    let max_requests = std::env::var("RATE_LIMIT_MAX_REQUESTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(300);
    let limiter =
        crate::rate_limit::RateLimitState::new(max_requests, std::time::Duration::from_secs(60));

    Router::new()
        .merge(rest::api_router_with_rate_limit(limiter))
        .route("/health", axum::routing::get(health::health_check))
        .with_state(AppState { pool })
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
