use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    middleware,
    Router,
};
use serde_json::Value;
use shared_types::Role;
use sqlx::{Pool, Postgres};
use tokio::sync::Mutex;
use tower::ServiceExt;

/// Serializes tests against the shared database. Every test truncates and
/// reseeds, so two running at once would eat each other's rows.
static DB_LOCK: std::sync::LazyLock<Mutex<()>> = std::sync::LazyLock::new(|| Mutex::new(()));

async fn connect_and_reset() -> Pool<Postgres> {
    let _ = dotenvy::dotenv();

    // Tokens need a signing key even when no .env is present
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "keystead-integration-test-secret");
    }

    let url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("set TEST_DATABASE_URL or DATABASE_URL to run the integration suite");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect to test database");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("run migrations");

    sqlx::query("TRUNCATE users, refresh_tokens, properties CASCADE")
        .execute(&pool)
        .await
        .expect("truncate tables");

    // Fixture account (id 1) backs the claims create_test_token mints
    sqlx::query(
        "INSERT INTO users (id, username, email, display_name, password_hash, role)
         VALUES (1, 'fixture', 'fixture@keystead.test', 'Fixture User', 'not-a-real-hash', 'tenant')
         ON CONFLICT (id) DO NOTHING",
    )
    .execute(&pool)
    .await
    .expect("seed fixture user");

    // The explicit id bypasses the sequence; advance it or the first
    // registration on a fresh database collides with id 1.
    sqlx::query("SELECT setval(pg_get_serial_sequence('users', 'id'), (SELECT MAX(id) FROM users))")
        .execute(&pool)
        .await
        .expect("advance users id sequence");

    pool
}

fn build_router(pool: &Pool<Postgres>, api: Router<server::db::AppState>) -> Router {
    let state = server::db::AppState { pool: pool.clone() };
    // The permissive auth middleware turns Bearer tokens into Claims;
    // unauthenticated requests still pass through to the handlers.
    api.route("/health", axum::routing::get(server::health::health_check))
        .layer(middleware::from_fn_with_state(
            pool.clone(),
            server::auth::middleware::auth_middleware,
        ))
        .with_state(state)
}

/// Reset the database and hand back a router over the full REST surface.
///
/// Hold the returned guard for the whole test; dropping it early lets the
/// next test truncate under you.
pub async fn test_app() -> (Router, Pool<Postgres>, tokio::sync::MutexGuard<'static, ()>) {
    let guard = DB_LOCK.lock().await;
    let pool = connect_and_reset().await;
    let router = build_router(&pool, server::rest::api_router());
    (router, pool, guard)
}

/// Same as [`test_app`] but with a tight request budget, for 429 tests.
pub async fn test_app_rate_limited(
    max_requests: u32,
) -> (Router, Pool<Postgres>, tokio::sync::MutexGuard<'static, ()>) {
    let guard = DB_LOCK.lock().await;
    let pool = connect_and_reset().await;

    let rate_limit = server::rate_limit::RateLimitState::new(
        max_requests,
        std::time::Duration::from_secs(60),
    );
    let router = build_router(&pool, server::rest::api_router_with_rate_limit(rate_limit));
    (router, pool, guard)
}

/// Mint an access token for the fixture user carrying the given role.
/// Role checks read claims, not the users table, so this alone reaches
/// every policy outcome.
pub fn create_test_token(role: Role) -> String {
    server::auth::jwt::create_access_token(1, "fixture@keystead.test", role)
        .expect("mint test JWT")
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
}

async fn send_json(
    app: &Router,
    builder: axum::http::request::Builder,
    body: &str,
) -> (StatusCode, Value) {
    let req = builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

/// GET without credentials.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = request(Method::GET, uri, None).body(Body::empty()).unwrap();
    send(app, req).await
}

/// GET with a Bearer access token.
pub async fn get_authed(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    let req = request(Method::GET, uri, Some(token))
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

/// GET with a spoofed client address, for the per-client rate limit buckets.
pub async fn get_from_ip(
    app: &Router,
    uri: &str,
    token: &str,
    ip: &str,
) -> (StatusCode, Value) {
    let req = request(Method::GET, uri, Some(token))
        .header("x-forwarded-for", ip)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

/// POST a JSON body without credentials.
pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send_json(app, request(Method::POST, uri, None), body).await
}

/// POST a JSON body with a Bearer access token.
pub async fn post_json_authed(
    app: &Router,
    uri: &str,
    body: &str,
    token: &str,
) -> (StatusCode, Value) {
    send_json(app, request(Method::POST, uri, Some(token)), body).await
}

/// PUT a JSON body with a Bearer access token.
pub async fn put_json_authed(
    app: &Router,
    uri: &str,
    body: &str,
    token: &str,
) -> (StatusCode, Value) {
    send_json(app, request(Method::PUT, uri, Some(token)), body).await
}

/// DELETE with a Bearer access token.
pub async fn delete_authed(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    let req = request(Method::DELETE, uri, Some(token))
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("route request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");

    // Non-JSON bodies come back as plain strings so assertions can still
    // print something useful.
    let body = match serde_json::from_slice(&bytes) {
        Ok(json) => json,
        Err(_) if bytes.is_empty() => Value::Null,
        Err(_) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
    };

    (status, body)
}

/// Register an account through the public endpoint and return the auth body.
pub async fn register_user(
    app: &Router,
    username: &str,
    email: &str,
    password: &str,
) -> Value {
    let body = serde_json::json!({
        "username": username,
        "email": email,
        "display_name": format!("{username} Display"),
        "password": password,
    });

    let (status, response) =
        post_json(app, "/api/v1/auth/register", &body.to_string()).await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "register {username}: {response:?}"
    );
    response
}

/// Create a property through the API and return its JSON.
pub async fn create_test_property(
    app: &Router,
    token: &str,
    name: &str,
    unit_count: i32,
) -> Value {
    let body = serde_json::json!({
        "name": name,
        "address_line": "12 Maple St",
        "city": "Portland",
        "state": "OR",
        "postal_code": "97201",
        "property_type": "apartment",
        "unit_count": unit_count,
    });

    let (status, response) =
        post_json_authed(app, "/api/v1/properties", &body.to_string(), token).await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "create property {name}: {response:?}"
    );
    response
}
