use std::sync::OnceLock;
use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use sqlx::PgPool;

static STARTED: OnceLock<Instant> = OnceLock::new();

/// Pin the process start time. First call wins; later calls keep the
/// original instant.
pub fn record_start_time() {
    STARTED.get_or_init(Instant::now);
}

fn uptime_seconds() -> u64 {
    STARTED.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

/// Payload for the liveness endpoint. `db` carries `"connected"` or
/// the probe error text so an operator can see why a check went red
/// without shell access.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub db: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Liveness endpoint. Mounted outside the auth guards and the rate
/// limiter so load balancers can always reach it.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up and reachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(pool): State<PgPool>) -> Json<HealthResponse> {
    let db = match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => "connected".to_string(),
        Err(e) => format!("error: {e}"),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        db,
        uptime_seconds: uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
