use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use shared_types::{
    is_valid_property_type, AppError, CreatePropertyRequest, DashboardStats, Property,
    UpdatePropertyRequest,
};

use crate::auth::guards::{Managers, PolicyGuarded, Staff};
use crate::error_convert::{SqlxErrorExt, ValidateRequest};

fn parse_property_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::bad_request("Invalid property ID"))
}

// ---------------------------------------------------------------------------
// GET /api/v1/properties
// ---------------------------------------------------------------------------

/// List the portfolio, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/properties",
    responses(
        (status = 200, description = "Portfolio", body = Vec<Property>),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 403, description = "Caller is not portfolio staff", body = AppError)
    ),
    security(("bearer_auth" = [])),
    tag = "properties"
)]
#[tracing::instrument(skip(pool, _auth))]
pub async fn list_properties(
    State(pool): State<Pool<Postgres>>,
    _auth: PolicyGuarded<Staff>,
) -> Result<Json<Vec<Property>>, AppError> {
    let properties = sqlx::query_as::<_, Property>(
        r#"SELECT id, name, address_line, city, state, postal_code,
                  property_type, unit_count, occupied_count, status, created_at
           FROM properties ORDER BY created_at DESC"#,
    )
    .fetch_all(&pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(Json(properties))
}

// ---------------------------------------------------------------------------
// POST /api/v1/properties
// ---------------------------------------------------------------------------

/// Add a property to the portfolio. Managers only.
#[utoipa::path(
    post,
    path = "/api/v1/properties",
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "Property created", body = Property),
        (status = 400, description = "Unknown property type", body = AppError),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 403, description = "Caller is not a portfolio manager", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    security(("bearer_auth" = [])),
    tag = "properties"
)]
#[tracing::instrument(skip(pool, auth, payload))]
pub async fn create_property(
    State(pool): State<Pool<Postgres>>,
    auth: PolicyGuarded<Managers>,
    Json(payload): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<Property>), AppError> {
    payload.validate_request()?;
    if !is_valid_property_type(&payload.property_type) {
        return Err(AppError::bad_request("Unknown property type"));
    }

    let property = sqlx::query_as::<_, Property>(
        r#"INSERT INTO properties
               (name, address_line, city, state, postal_code, property_type, unit_count)
           VALUES ($1, $2, $3, $4, $5, $6, $7)
           RETURNING id, name, address_line, city, state, postal_code,
                     property_type, unit_count, occupied_count, status, created_at"#,
    )
    .bind(&payload.name)
    .bind(&payload.address_line)
    .bind(&payload.city)
    .bind(&payload.state)
    .bind(&payload.postal_code)
    .bind(&payload.property_type)
    .bind(payload.unit_count)
    .fetch_one(&pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    tracing::info!(property_id = %property.id, by = auth.0.sub, "Property created");
    Ok((StatusCode::CREATED, Json(property)))
}

// ---------------------------------------------------------------------------
// GET /api/v1/properties/{id}
// ---------------------------------------------------------------------------

/// Get a single property.
#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}",
    params(("id" = String, Path, description = "Property UUID")),
    responses(
        (status = 200, description = "Property found", body = Property),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 403, description = "Caller is not portfolio staff", body = AppError),
        (status = 404, description = "No such property", body = AppError)
    ),
    security(("bearer_auth" = [])),
    tag = "properties"
)]
#[tracing::instrument(skip(pool, _auth))]
pub async fn get_property(
    State(pool): State<Pool<Postgres>>,
    _auth: PolicyGuarded<Staff>,
    Path(id): Path<String>,
) -> Result<Json<Property>, AppError> {
    let property_id = parse_property_id(&id)?;

    let property = sqlx::query_as::<_, Property>(
        r#"SELECT id, name, address_line, city, state, postal_code,
                  property_type, unit_count, occupied_count, status, created_at
           FROM properties WHERE id = $1"#,
    )
    .bind(property_id)
    .fetch_optional(&pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?
    .ok_or_else(|| AppError::not_found("Property not found"))?;

    Ok(Json(property))
}

// ---------------------------------------------------------------------------
// PUT /api/v1/properties/{id}
// ---------------------------------------------------------------------------

/// Update a property. Managers only.
#[utoipa::path(
    put,
    path = "/api/v1/properties/{id}",
    params(("id" = String, Path, description = "Property UUID")),
    request_body = UpdatePropertyRequest,
    responses(
        (status = 200, description = "Property updated", body = Property),
        (status = 400, description = "Invalid type, status, or occupancy", body = AppError),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 403, description = "Caller is not a portfolio manager", body = AppError),
        (status = 404, description = "No such property", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    security(("bearer_auth" = [])),
    tag = "properties"
)]
#[tracing::instrument(skip(pool, _auth, payload))]
pub async fn update_property(
    State(pool): State<Pool<Postgres>>,
    _auth: PolicyGuarded<Managers>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePropertyRequest>,
) -> Result<Json<Property>, AppError> {
    let property_id = parse_property_id(&id)?;

    payload.validate_request()?;
    if !is_valid_property_type(&payload.property_type) {
        return Err(AppError::bad_request("Unknown property type"));
    }
    if !matches!(payload.status.as_str(), "active" | "archived") {
        return Err(AppError::bad_request("Status must be active or archived"));
    }
    if payload.occupied_count > payload.unit_count {
        return Err(AppError::bad_request(
            "Occupied units cannot exceed the unit count",
        ));
    }

    let property = sqlx::query_as::<_, Property>(
        r#"UPDATE properties
           SET name = $1, address_line = $2, city = $3, state = $4, postal_code = $5,
               property_type = $6, unit_count = $7, occupied_count = $8, status = $9
           WHERE id = $10
           RETURNING id, name, address_line, city, state, postal_code,
                     property_type, unit_count, occupied_count, status, created_at"#,
    )
    .bind(&payload.name)
    .bind(&payload.address_line)
    .bind(&payload.city)
    .bind(&payload.state)
    .bind(&payload.postal_code)
    .bind(&payload.property_type)
    .bind(payload.unit_count)
    .bind(payload.occupied_count)
    .bind(&payload.status)
    .bind(property_id)
    .fetch_optional(&pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?
    .ok_or_else(|| AppError::not_found("Property not found"))?;

    Ok(Json(property))
}

// ---------------------------------------------------------------------------
// DELETE /api/v1/properties/{id}
// ---------------------------------------------------------------------------

/// Remove a property from the portfolio. Managers only.
#[utoipa::path(
    delete,
    path = "/api/v1/properties/{id}",
    params(("id" = String, Path, description = "Property UUID")),
    responses(
        (status = 204, description = "Property removed"),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 403, description = "Caller is not a portfolio manager", body = AppError),
        (status = 404, description = "No such property", body = AppError)
    ),
    security(("bearer_auth" = [])),
    tag = "properties"
)]
#[tracing::instrument(skip(pool, auth))]
pub async fn delete_property(
    State(pool): State<Pool<Postgres>>,
    auth: PolicyGuarded<Managers>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let property_id = parse_property_id(&id)?;

    let result = sqlx::query("DELETE FROM properties WHERE id = $1")
        .bind(property_id)
        .execute(&pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Property not found"));
    }

    tracing::info!(%property_id, by = auth.0.sub, "Property removed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /api/v1/dashboard/stats
// ---------------------------------------------------------------------------

/// Aggregated portfolio statistics for the staff dashboard.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    responses(
        (status = 200, description = "Portfolio statistics", body = DashboardStats),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 403, description = "Caller is not portfolio staff", body = AppError)
    ),
    security(("bearer_auth" = [])),
    tag = "dashboard"
)]
#[tracing::instrument(skip(pool, _auth))]
pub async fn dashboard_stats(
    State(pool): State<Pool<Postgres>>,
    _auth: PolicyGuarded<Staff>,
) -> Result<Json<DashboardStats>, AppError> {
    let total_properties = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM properties")
        .fetch_one(&pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    let (total_units, occupied_units) = sqlx::query_as::<_, (i64, i64)>(
        r#"SELECT COALESCE(SUM(unit_count), 0), COALESCE(SUM(occupied_count), 0)
           FROM properties WHERE status = 'active'"#,
    )
    .fetch_one(&pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let recent_properties = sqlx::query_as::<_, Property>(
        r#"SELECT id, name, address_line, city, state, postal_code,
                  property_type, unit_count, occupied_count, status, created_at
           FROM properties ORDER BY created_at DESC LIMIT 5"#,
    )
    .fetch_all(&pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(Json(DashboardStats {
        total_properties,
        total_units,
        occupied_units,
        total_users,
        recent_properties,
    }))
}
