use dioxus::prelude::*;
use shared_types::{AuthUser, MessageResponse};

#[cfg(feature = "server")]
use crate::db::get_db;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, SqlxErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use super::auth::*;

/// Create an account and sign it in. The new row lands as a tenant;
/// [`crate::auth::maybe_promote_admin`] upgrades it when the email
/// matches the bootstrap admin. Session cookies are scheduled on
/// success.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn register(
    username: String,
    email: String,
    password: String,
    display_name: String,
) -> Result<AuthUser, ServerFnError> {
    use crate::auth::password as pw;
    use shared_types::{AppError, RegisterRequest, Role};

    RegisterRequest {
        username: username.clone(),
        email: email.clone(),
        password: password.clone(),
        display_name: display_name.clone(),
    }
    .validate_request()
    .map_err(|e| e.into_server_fn_error())?;

    let password_hash = pw::hash_password(&password)
        .map_err(|e| AppError::internal(e.to_string()).into_server_fn_error())?;

    let db = get_db().await;
    let (user_id, username, display_name, email, role_tag) =
        sqlx::query_as::<_, (i64, String, String, String, String)>(
            r#"INSERT INTO users (username, email, password_hash, display_name)
               VALUES ($1, $2, $3, $4)
               RETURNING id, username, display_name, email, role"#,
        )
        .bind(&username)
        .bind(&email)
        .bind(&password_hash)
        .bind(&display_name)
        .fetch_one(db)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?;

    let role =
        crate::auth::maybe_promote_admin(db, user_id, &email, Role::from_str_or_default(&role_tag))
            .await;

    issue_session(user_id, &email, role).await?;

    Ok(AuthUser {
        id: user_id,
        username,
        display_name,
        email,
        role,
    })
}

/// Sign in with email and password. Wrong email and wrong password
/// produce the same message so the form does not confirm which
/// addresses have accounts.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(email: String, password: String) -> Result<AuthUser, ServerFnError> {
    use crate::auth::password as pw;
    use shared_types::{AppError, LoginRequest, Role};

    LoginRequest {
        email: email.clone(),
        password: password.clone(),
    }
    .validate_request()
    .map_err(|e| e.into_server_fn_error())?;

    let db = get_db().await;
    let (user_id, username, display_name, email, password_hash, role_tag) =
        sqlx::query_as::<_, (i64, String, String, String, String, String)>(
            r#"SELECT id, username, display_name, email, password_hash, role
               FROM users WHERE email = $1"#,
        )
        .bind(&email)
        .fetch_optional(db)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?
        .ok_or_else(|| AppError::unauthorized("Incorrect email or password").into_server_fn_error())?;

    let password_ok = pw::verify_password(&password, &password_hash)
        .map_err(|e| AppError::internal(e.to_string()).into_server_fn_error())?;
    if !password_ok {
        return Err(AppError::unauthorized("Incorrect email or password").into_server_fn_error());
    }

    let role =
        crate::auth::maybe_promote_admin(db, user_id, &email, Role::from_str_or_default(&role_tag))
            .await;

    issue_session(user_id, &email, role).await?;

    Ok(AuthUser {
        id: user_id,
        username,
        display_name,
        email,
        role,
    })
}

/// Identity of the caller, or `None` for visitors. Signed-out is a
/// normal answer here, never an error; the page guard decides whether
/// that means a login redirect.
///
/// The middleware normally leaves validated `Claims` in extensions.
/// When it has not run, the cookies are checked directly, ending with
/// the refresh token so a user with an expired access cookie still
/// shows as signed in.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_current_user() -> Result<Option<AuthUser>, ServerFnError> {
    use crate::auth::{cookies, jwt};

    let Some(ctx) = dioxus::fullstack::FullstackContext::current() else {
        tracing::debug!("no request context; treating caller as signed out");
        return Ok(None);
    };

    let parts = ctx.parts_mut();
    if let Some(claims) = parts.extensions.get::<jwt::Claims>() {
        return fetch_auth_user(claims.sub).await;
    }

    let headers = parts.headers.clone();
    if let Some(token) = cookies::extract_access_token(&headers) {
        match jwt::validate_access_token(&token) {
            Ok(claims) => return fetch_auth_user(claims.sub).await,
            Err(_) => tracing::debug!("access token present but not valid"),
        }
    }

    if let Some(refresh_token) = cookies::extract_refresh_token(&headers) {
        if let Ok(claims) = jwt::validate_refresh_token(&refresh_token) {
            let db = get_db().await;
            let live = sqlx::query_scalar::<_, bool>(
                "SELECT NOT revoked FROM refresh_tokens WHERE token_hash = $1 AND user_id = $2",
            )
            .bind(jwt::hash_token(&refresh_token))
            .bind(claims.sub)
            .fetch_optional(db)
            .await
            .map_err(|e| e.into_app_error().into_server_fn_error())?;

            if live == Some(true) {
                return fetch_auth_user(claims.sub).await;
            }
        }
    }

    Ok(None)
}

/// Sign out everywhere: every live refresh token for the user is
/// revoked, then the cookies are cleared.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    use crate::auth::{cookies, jwt};

    let claims = dioxus::fullstack::FullstackContext::current()
        .and_then(|ctx| cookies::extract_access_token(&ctx.parts_mut().headers))
        .and_then(|token| jwt::validate_access_token(&token).ok());

    if let Some(claims) = claims {
        let db = get_db().await;
        let _ = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1 AND revoked = FALSE",
        )
        .bind(claims.sub)
        .execute(db)
        .await;
    }

    cookies::queue_clear_cookies();
    Ok(())
}

/// Change the signed-in user's display name and email.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn update_profile(
    display_name: String,
    email: String,
) -> Result<AuthUser, ServerFnError> {
    use shared_types::{AppError, Role, UpdateProfileRequest};

    let claims = require_auth()?;

    UpdateProfileRequest {
        display_name: display_name.clone(),
        email: email.clone(),
    }
    .validate_request()
    .map_err(|e| e.into_server_fn_error())?;

    let db = get_db().await;
    let (user_id, username, display_name, email, role_tag) =
        sqlx::query_as::<_, (i64, String, String, String, String)>(
            r#"UPDATE users SET display_name = $2, email = $3 WHERE id = $1
               RETURNING id, username, display_name, email, role"#,
        )
        .bind(claims.sub)
        .bind(&display_name)
        .bind(&email)
        .fetch_optional(db)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?
        .ok_or_else(|| {
            AppError::not_found("Account no longer exists").into_server_fn_error()
        })?;

    Ok(AuthUser {
        id: user_id,
        username,
        display_name,
        email,
        role: Role::from_str_or_default(&role_tag),
    })
}

/// Set a new password after verifying the current one.
#[cfg_attr(
    feature = "server",
    tracing::instrument(skip(current_password, new_password))
)]
#[server]
pub async fn change_password(
    current_password: String,
    new_password: String,
) -> Result<MessageResponse, ServerFnError> {
    use crate::auth::password as pw;
    use shared_types::{AppError, ChangePasswordRequest};

    let claims = require_auth()?;

    ChangePasswordRequest {
        current_password: current_password.clone(),
        new_password: new_password.clone(),
    }
    .validate_request()
    .map_err(|e| e.into_server_fn_error())?;

    let db = get_db().await;
    let stored_hash =
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(claims.sub)
            .fetch_optional(db)
            .await
            .map_err(|e| e.into_app_error().into_server_fn_error())?
            .ok_or_else(|| {
                AppError::not_found("Account no longer exists").into_server_fn_error()
            })?;

    let current_ok = pw::verify_password(&current_password, &stored_hash)
        .map_err(|e| AppError::internal(e.to_string()).into_server_fn_error())?;
    if !current_ok {
        return Err(
            AppError::validation("Current password does not match", Default::default())
                .into_server_fn_error(),
        );
    }

    let new_hash = pw::hash_password(&new_password)
        .map_err(|e| AppError::internal(e.to_string()).into_server_fn_error())?;

    sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
        .bind(claims.sub)
        .bind(&new_hash)
        .execute(db)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?;

    Ok(MessageResponse {
        message: "Password updated.".to_string(),
    })
}
