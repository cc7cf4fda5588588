use axum::{extract::State, http::StatusCode, Json};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, AuthResponse, AuthUser, LoginRequest, RefreshRequest, RegisterRequest, Role,
};

use crate::auth::guards::AuthRequired;
use crate::auth::jwt::{self, hash_token};
use crate::auth::password as pw;
use crate::error_convert::{SqlxErrorExt, ValidateRequest};

/// Mint a token pair for `user` and persist the refresh token's hash.
/// The raw refresh token goes back to the API client; only its SHA-256
/// hex lands in the database.
async fn issue_api_tokens(
    pool: &Pool<Postgres>,
    user: AuthUser,
) -> Result<AuthResponse, AppError> {
    let access_token = jwt::create_access_token(user.id, &user.email, user.role)
        .map_err(|e| AppError::internal(e.to_string()))?;

    let (refresh_token, expires_at) = jwt::create_refresh_token(user.id, &user.email, user.role)
        .map_err(|e| AppError::internal(e.to_string()))?;

    let refresh_hash = hash_token(&refresh_token);
    sqlx::query("INSERT INTO refresh_tokens (user_id, token_hash, expires_at) VALUES ($1, $2, $3)")
        .bind(user.id)
        .bind(&refresh_hash)
        .bind(expires_at)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(AuthResponse {
        user,
        access_token,
        refresh_token,
    })
}

// ---------------------------------------------------------------------------
// POST /api/v1/auth/register
// ---------------------------------------------------------------------------

/// Register a new account. New accounts start as tenants.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 409, description = "Email or username already taken", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, payload))]
pub async fn register(
    State(pool): State<Pool<Postgres>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    payload.validate_request()?;

    let password_hash =
        pw::hash_password(&payload.password).map_err(|e| AppError::internal(e.to_string()))?;

    let (user_id, username, display_name, email, role) =
        sqlx::query_as::<_, (i64, String, String, String, String)>(
            r#"INSERT INTO users (username, email, display_name, password_hash)
               VALUES ($1, $2, $3, $4)
               RETURNING id, username, display_name, email, role"#,
        )
        .bind(&payload.username)
        .bind(&payload.email)
        .bind(&payload.display_name)
        .bind(&password_hash)
        .fetch_one(&pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    let role = Role::from_str_or_default(&role);
    let role = crate::auth::maybe_promote_admin(&pool, user_id, &email, role).await;

    let user = AuthUser {
        id: user_id,
        username,
        display_name,
        email,
        role,
    };

    tracing::info!(user_id, "Account registered via REST");
    let response = issue_api_tokens(&pool, user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

// ---------------------------------------------------------------------------
// POST /api/v1/auth/login
// ---------------------------------------------------------------------------

/// Authenticate with email and password.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, payload))]
pub async fn login(
    State(pool): State<Pool<Postgres>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate_request()?;

    let row = sqlx::query_as::<_, (i64, String, String, String, String, String)>(
        r#"SELECT id, username, display_name, email, password_hash, role
           FROM users WHERE email = $1"#,
    )
    .bind(&payload.email)
    .fetch_optional(&pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    // Same error for unknown email and wrong password
    let (user_id, username, display_name, email, password_hash, role) =
        row.ok_or_else(|| AppError::unauthorized("Incorrect email or password"))?;

    let valid = pw::verify_password(&payload.password, &password_hash)
        .map_err(|e| AppError::internal(e.to_string()))?;
    if !valid {
        return Err(AppError::unauthorized("Incorrect email or password"));
    }

    let role = Role::from_str_or_default(&role);
    let role = crate::auth::maybe_promote_admin(&pool, user_id, &email, role).await;

    let user = AuthUser {
        id: user_id,
        username,
        display_name,
        email,
        role,
    };

    let response = issue_api_tokens(&pool, user).await?;
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// POST /api/v1/auth/refresh
// ---------------------------------------------------------------------------

/// Exchange a refresh token for a fresh token pair.
///
/// The presented token is revoked and replaced; each refresh token works
/// exactly once, so a replayed token is a signal the pair leaked.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair", body = AuthResponse),
        (status = 401, description = "Refresh token invalid, expired, or already used", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, payload))]
pub async fn refresh(
    State(pool): State<Pool<Postgres>>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let claims = jwt::validate_refresh_token(&payload.refresh_token)
        .map_err(|_| AppError::unauthorized("Invalid or expired refresh token"))?;

    let token_hash = hash_token(&payload.refresh_token);
    let row = sqlx::query_as::<_, (i64, bool)>(
        "SELECT id, revoked FROM refresh_tokens WHERE token_hash = $1 AND user_id = $2",
    )
    .bind(&token_hash)
    .bind(claims.sub)
    .fetch_optional(&pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let (stored_id, revoked) =
        row.ok_or_else(|| AppError::unauthorized("Invalid or expired refresh token"))?;
    if revoked {
        tracing::warn!(user_id = claims.sub, "Replay of a revoked refresh token");
        return Err(AppError::unauthorized("Invalid or expired refresh token"));
    }

    sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = $1")
        .bind(stored_id)
        .execute(&pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    // Re-read the account so a role change since issuance takes effect here
    let row = sqlx::query_as::<_, (i64, String, String, String, String)>(
        "SELECT id, username, display_name, email, role FROM users WHERE id = $1",
    )
    .bind(claims.sub)
    .fetch_optional(&pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let (user_id, username, display_name, email, role) =
        row.ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;

    let user = AuthUser {
        id: user_id,
        username,
        display_name,
        email,
        role: Role::from_str_or_default(&role),
    };

    let response = issue_api_tokens(&pool, user).await?;
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// POST /api/v1/auth/logout
// ---------------------------------------------------------------------------

/// Revoke every active refresh token for the caller.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Not authenticated", body = AppError)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, auth))]
pub async fn logout(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
) -> Result<StatusCode, AppError> {
    sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1 AND revoked = FALSE")
        .bind(auth.0.sub)
        .execute(&pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /api/v1/auth/me
// ---------------------------------------------------------------------------

/// The account behind the presented access token.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current account", body = AuthUser),
        (status = 401, description = "Not authenticated", body = AppError)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, auth))]
pub async fn me(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
) -> Result<Json<AuthUser>, AppError> {
    let row = sqlx::query_as::<_, (i64, String, String, String, String)>(
        "SELECT id, username, display_name, email, role FROM users WHERE id = $1",
    )
    .bind(auth.0.sub)
    .fetch_optional(&pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let (user_id, username, display_name, email, role) =
        row.ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;

    Ok(Json(AuthUser {
        id: user_id,
        username,
        display_name,
        email,
        role: Role::from_str_or_default(&role),
    }))
}
