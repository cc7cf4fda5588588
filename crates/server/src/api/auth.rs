// Credential plumbing shared by every server function module. Nothing here
// is itself a server function.

use dioxus::prelude::*;
use shared_types::{AccessPolicy, AppError, AuthUser, Role};

use crate::auth::{cookies, jwt};
use crate::db::get_db;
use crate::error_convert::{AppErrorExt, SqlxErrorExt};

/// Resolve the caller's validated [`jwt::Claims`] or fail with a 401-shaped error.
///
/// The auth middleware normally leaves Claims in the request extensions; when
/// a call arrives on a path the middleware does not cover, the token is read
/// straight off the request instead.
pub(crate) fn require_auth() -> Result<jwt::Claims, ServerFnError> {
    let Some(ctx) = dioxus::fullstack::FullstackContext::current() else {
        return Err(AppError::unauthorized("Authentication required").into_server_fn_error());
    };
    let parts = ctx.parts_mut();

    if let Some(claims) = parts.extensions.get::<jwt::Claims>() {
        return Ok(claims.clone());
    }

    let headers = parts.headers.clone();
    match cookies::extract_access_token(&headers) {
        Some(token) => jwt::validate_access_token(&token)
            .map_err(|_| AppError::unauthorized("Invalid or expired token").into_server_fn_error()),
        None => Err(AppError::unauthorized("Authentication required").into_server_fn_error()),
    }
}

/// Require the caller to hold a role admitted by `policy`.
///
/// Server functions name their policy inline, the same way routes do, and
/// the membership test is the same `AccessPolicy::permits` the page guard
/// runs. Unauthenticated callers get the 401-shaped error, permitted roles
/// get their Claims back, everyone else the 403-shaped denial naming the
/// allowed roles.
pub(crate) fn require_policy(policy: AccessPolicy) -> Result<jwt::Claims, ServerFnError> {
    let claims = require_auth()?;
    if !policy.permits(claims.role()) {
        return Err(AppError::forbidden(format!(
            "This operation is limited to: {}",
            policy.describe()
        ))
        .into_server_fn_error());
    }
    Ok(claims)
}

/// Load the [`AuthUser`] behind a user id.
pub(crate) async fn fetch_auth_user(user_id: i64) -> Result<Option<AuthUser>, ServerFnError> {
    let db = get_db().await;
    let row = sqlx::query_as::<_, (i64, String, String, String, String)>(
        "SELECT id, username, display_name, email, role FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .map_err(|e| e.into_app_error().into_server_fn_error())?;

    let Some((id, username, display_name, email, role)) = row else {
        // The token outlived the account. Drop the cookies so the client
        // stops presenting credentials for a user that no longer exists.
        tracing::warn!(user_id, "access token references a missing user");
        cookies::queue_clear_cookies();
        return Ok(None);
    };

    Ok(Some(AuthUser {
        id,
        username,
        display_name,
        email,
        role: Role::from_str_or_default(&role),
    }))
}

/// Mint an access/refresh pair for a user, persist the refresh hash, and
/// queue both cookies onto the response.
pub(crate) async fn issue_session(
    user_id: i64,
    email: &str,
    role: Role,
) -> Result<(), ServerFnError> {
    let access_token = jwt::create_access_token(user_id, email, role)
        .map_err(|e| AppError::internal(e.to_string()).into_server_fn_error())?;
    let (refresh_token, expires_at) = jwt::create_refresh_token(user_id, email, role)
        .map_err(|e| AppError::internal(e.to_string()).into_server_fn_error())?;

    // Only the hash touches the database; the raw refresh JWT exists in the
    // cookie and nowhere else.
    let db = get_db().await;
    sqlx::query("INSERT INTO refresh_tokens (user_id, token_hash, expires_at) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(jwt::hash_token(&refresh_token))
        .bind(expires_at)
        .execute(db)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?;

    cookies::queue_auth_cookies(&access_token, &refresh_token);
    Ok(())
}
