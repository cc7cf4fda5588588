use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{AppError, Role, SetRoleRequest, User};

use crate::auth::guards::{Admins, PolicyGuarded};
use crate::error_convert::SqlxErrorExt;

fn user_from_row(row: (i64, String, String, String, String, chrono::DateTime<chrono::Utc>)) -> User {
    let (id, username, display_name, email, role, created_at) = row;
    User {
        id,
        username,
        display_name,
        email,
        role: Role::from_str_or_default(&role),
        created_at: created_at.to_string(),
    }
}

// ---------------------------------------------------------------------------
// GET /api/v1/users
// ---------------------------------------------------------------------------

/// List all user accounts. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All accounts", body = Vec<User>),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 403, description = "Caller is not an admin", body = AppError)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[tracing::instrument(skip(pool, _auth))]
pub async fn list_users(
    State(pool): State<Pool<Postgres>>,
    _auth: PolicyGuarded<Admins>,
) -> Result<Json<Vec<User>>, AppError> {
    let rows = sqlx::query_as::<_, (i64, String, String, String, String, chrono::DateTime<chrono::Utc>)>(
        r#"SELECT id, username, display_name, email, role, created_at
           FROM users ORDER BY created_at DESC"#,
    )
    .fetch_all(&pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(Json(rows.into_iter().map(user_from_row).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/v1/users/{id}
// ---------------------------------------------------------------------------

/// Get a single user account. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Account found", body = User),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 403, description = "Caller is not an admin", body = AppError),
        (status = 404, description = "No such account", body = AppError)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[tracing::instrument(skip(pool, _auth))]
pub async fn get_user(
    State(pool): State<Pool<Postgres>>,
    _auth: PolicyGuarded<Admins>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let row = sqlx::query_as::<_, (i64, String, String, String, String, chrono::DateTime<chrono::Utc>)>(
        r#"SELECT id, username, display_name, email, role, created_at
           FROM users WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let row = row.ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;
    Ok(Json(user_from_row(row)))
}

// ---------------------------------------------------------------------------
// PUT /api/v1/users/{id}/role
// ---------------------------------------------------------------------------

/// Assign a role to a user account. Admin only.
///
/// Admins cannot change their own role; that path can lock the last
/// admin out of the console.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/role",
    params(("id" = i64, Path, description = "User ID")),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Role assigned", body = User),
        (status = 400, description = "Attempted self-change", body = AppError),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 403, description = "Caller is not an admin", body = AppError),
        (status = 404, description = "No such account", body = AppError)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[tracing::instrument(skip(pool, auth, payload))]
pub async fn set_user_role(
    State(pool): State<Pool<Postgres>>,
    auth: PolicyGuarded<Admins>,
    Path(id): Path<i64>,
    Json(payload): Json<SetRoleRequest>,
) -> Result<Json<User>, AppError> {
    if auth.0.sub == id {
        return Err(AppError::bad_request("You cannot change your own role"));
    }

    let row = sqlx::query_as::<_, (i64, String, String, String, String, chrono::DateTime<chrono::Utc>)>(
        r#"UPDATE users SET role = $1 WHERE id = $2
           RETURNING id, username, display_name, email, role, created_at"#,
    )
    .bind(payload.role.as_str())
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let row = row.ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;

    tracing::info!(user_id = id, role = payload.role.as_str(), "Role assigned");
    Ok(Json(user_from_row(row)))
}

// ---------------------------------------------------------------------------
// DELETE /api/v1/users/{id}
// ---------------------------------------------------------------------------

/// Delete a user account. Admin only; self-deletion is rejected.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Attempted self-deletion", body = AppError),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 403, description = "Caller is not an admin", body = AppError),
        (status = 404, description = "No such account", body = AppError)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[tracing::instrument(skip(pool, auth))]
pub async fn delete_user(
    State(pool): State<Pool<Postgres>>,
    auth: PolicyGuarded<Admins>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if auth.0.sub == id {
        return Err(AppError::bad_request("You cannot delete your own account"));
    }

    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(format!("User {} not found", id)));
    }

    tracing::info!(user_id = id, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}
