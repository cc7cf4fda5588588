use dioxus::prelude::*;
use shared_types::{FeatureFlags, MessageResponse, Role, User};

#[cfg(feature = "server")]
use crate::auth::guards::{Admins, RoutePolicy};
#[cfg(feature = "server")]
use crate::db::get_db;
#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, SqlxErrorExt};

#[cfg(feature = "server")]
use super::auth::*;

/// Columns the admin console shows, in [`user_from_row`] order.
#[cfg(feature = "server")]
const USER_COLUMNS: &str = "id, username, display_name, email, role, created_at";

#[cfg(feature = "server")]
type UserRow = (i64, String, String, String, String, chrono::DateTime<chrono::Utc>);

#[cfg(feature = "server")]
fn user_from_row((id, username, display_name, email, role, created_at): UserRow) -> User {
    User {
        id,
        username,
        display_name,
        email,
        role: Role::from_str_or_default(&role),
        created_at: created_at.to_string(),
    }
}

#[cfg(feature = "server")]
fn no_such_user(user_id: i64) -> ServerFnError {
    shared_types::AppError::not_found(format!("No user with id {user_id}")).into_server_fn_error()
}

/// Current feature flags. Open to everyone; nothing in them is sensitive.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// Every account with its assigned role, for the admin console table.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_users() -> Result<Vec<User>, ServerFnError> {
    require_policy(Admins::POLICY)?;

    let db = get_db().await;
    let rows = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY id"
    ))
    .fetch_all(db)
    .await
    .map_err(|e| e.into_app_error().into_server_fn_error())?;

    Ok(rows.into_iter().map(user_from_row).collect())
}

/// One account by id. Admin only.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_user(user_id: i64) -> Result<User, ServerFnError> {
    require_policy(Admins::POLICY)?;

    let db = get_db().await;
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await
    .map_err(|e| e.into_app_error().into_server_fn_error())?
    .ok_or_else(|| no_such_user(user_id))?;

    Ok(user_from_row(row))
}

/// Assign a role to another account. Admin only.
///
/// Takes effect at the target's next token refresh; their current access
/// token keeps the old role until it expires.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn set_user_role(user_id: i64, role: Role) -> Result<User, ServerFnError> {
    use shared_types::AppError;

    let claims = require_policy(Admins::POLICY)?;

    // Changing your own role could lock the last admin out
    if claims.sub == user_id {
        return Err(
            AppError::bad_request("You cannot change your own role").into_server_fn_error()
        );
    }

    let db = get_db().await;
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "UPDATE users SET role = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(user_id)
    .bind(role.as_str())
    .fetch_optional(db)
    .await
    .map_err(|e| e.into_app_error().into_server_fn_error())?
    .ok_or_else(|| no_such_user(user_id))?;

    tracing::info!(user_id, role = role.as_str(), "Role assigned");
    Ok(user_from_row(row))
}

/// Delete an account. Admin only, and never your own.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_user(user_id: i64) -> Result<MessageResponse, ServerFnError> {
    use shared_types::AppError;

    let claims = require_policy(Admins::POLICY)?;

    if claims.sub == user_id {
        return Err(
            AppError::bad_request("You cannot delete your own account").into_server_fn_error()
        );
    }

    let db = get_db().await;
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(db)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?;

    if result.rows_affected() == 0 {
        return Err(no_such_user(user_id));
    }

    Ok(MessageResponse::new("User deleted"))
}
