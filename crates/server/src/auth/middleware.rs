use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use sqlx::PgPool;

use super::cookies::{self, CookieOutbox, CookieUpdate};
use super::jwt::{self, hash_token, validate_access_token, validate_refresh_token};

/// Session middleware for every route, pages and REST alike.
///
/// Authenticates when it can and stays quiet when it cannot: a bad or
/// missing token leaves the request without `Claims`, and the guards
/// downstream decide what that means for the page or endpoint. An
/// expired access token with a live refresh cookie is rotated here so
/// the user never notices the short access expiry.
pub async fn auth_middleware(State(pool): State<PgPool>, mut req: Request, next: Next) -> Response {
    let outbox = CookieOutbox::default();
    req.extensions_mut().insert(outbox.clone());

    let headers = req.headers().clone();

    let authenticated = match cookies::extract_access_token(&headers) {
        Some(token) => match validate_access_token(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                true
            }
            Err(_) => false,
        },
        None => false,
    };

    let mut rotated: Option<(String, String)> = None;
    if !authenticated {
        if let Some(refresh) = cookies::extract_refresh_token(&headers) {
            rotated = rotate_session(&pool, &refresh, &mut req).await;
        }
    }

    let mut res = next.run(req).await;

    if let Some((access, refresh)) = rotated {
        cookies::set_auth_cookies(res.headers_mut(), &access, &refresh);
    }

    let pending = outbox.0.lock().unwrap().take();
    match pending {
        Some(CookieUpdate::Set {
            access_token,
            refresh_token,
        }) => {
            cookies::set_auth_cookies(res.headers_mut(), &access_token, &refresh_token);
        }
        Some(CookieUpdate::Clear) => {
            cookies::clear_auth_cookies(res.headers_mut());
        }
        None => {}
    }

    res
}

/// Swap a valid refresh token for a new pair. The stored row is
/// revoked before anything is issued so a replayed token dies after
/// one use. Fresh claims go into request extensions; the pair comes
/// back for the response cookies.
async fn rotate_session(
    pool: &PgPool,
    refresh_token: &str,
    req: &mut Request,
) -> Option<(String, String)> {
    let claims = validate_refresh_token(refresh_token).ok()?;

    // The table stores SHA-256 hashes, never raw tokens
    let (row_id, revoked): (i64, bool) = sqlx::query_as(
        "SELECT id, revoked FROM refresh_tokens WHERE token_hash = $1 AND user_id = $2",
    )
    .bind(hash_token(refresh_token))
    .bind(claims.sub)
    .fetch_optional(pool)
    .await
    .ok()
    .flatten()?;

    if revoked {
        return None;
    }

    let _ = sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = $1")
        .bind(row_id)
        .execute(pool)
        .await;

    // The new tokens reuse the old claims. A role change an admin made
    // mid-session lands at the next full login, at most one access
    // token lifetime later.
    let role = claims.role();
    let access = jwt::create_access_token(claims.sub, &claims.email, role).ok()?;
    let (refresh, expires_at) = jwt::create_refresh_token(claims.sub, &claims.email, role).ok()?;

    let _ = sqlx::query(
        "INSERT INTO refresh_tokens (user_id, token_hash, expires_at) VALUES ($1, $2, $3)",
    )
    .bind(claims.sub)
    .bind(hash_token(&refresh))
    .bind(expires_at)
    .execute(pool)
    .await;

    let fresh = validate_access_token(&access).ok()?;
    req.extensions_mut().insert(fresh);

    Some((access, refresh))
}
