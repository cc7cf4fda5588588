use std::sync::{Arc, Mutex};

use axum::http::{header, HeaderMap, HeaderValue};
use cookie::{Cookie, SameSite};

use super::jwt;

const ACCESS_COOKIE: &str = "keystead_access";
const REFRESH_COOKIE: &str = "keystead_refresh";

/// Both tokens ride in HttpOnly cookies so page scripts never see
/// them. REST clients skip cookies entirely and send the access token
/// as a Bearer header instead.
fn issue_cookie(name: &'static str, value: &str, max_age: cookie::time::Duration) -> HeaderValue {
    let secure = std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);

    let mut builder = Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .secure(secure);

    if let Ok(domain) = std::env::var("COOKIE_DOMAIN") {
        if !domain.is_empty() {
            builder = builder.domain(domain);
        }
    }

    HeaderValue::from_str(&builder.build().to_string()).expect("cookie header value should be valid")
}

/// Append Set-Cookie headers carrying both tokens, with lifetimes
/// taken from the JWT expiry configuration.
pub fn set_auth_cookies(headers: &mut HeaderMap, access_token: &str, refresh_token: &str) {
    let access_age = cookie::time::Duration::minutes(jwt::access_token_expiry_minutes());
    let refresh_age = cookie::time::Duration::days(jwt::refresh_token_expiry_days());

    headers.append(
        header::SET_COOKIE,
        issue_cookie(ACCESS_COOKIE, access_token, access_age),
    );
    headers.append(
        header::SET_COOKIE,
        issue_cookie(REFRESH_COOKIE, refresh_token, refresh_age),
    );
}

/// Append Set-Cookie headers that expire both tokens immediately.
pub fn clear_auth_cookies(headers: &mut HeaderMap) {
    for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
        headers.append(
            header::SET_COOKIE,
            issue_cookie(name, "", cookie::time::Duration::ZERO),
        );
    }
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|piece| Cookie::parse(piece.trim().to_string()).ok())
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

/// Access token from the cookie, or from an `Authorization: Bearer`
/// header when a REST client is calling.
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = cookie_value(headers, ACCESS_COOKIE) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Refresh tokens only ever travel as cookies; there is no header
/// fallback because REST clients refresh through the request body.
pub fn extract_refresh_token(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, REFRESH_COOKIE)
}

/// Cookie change requested by a server function, applied later by the
/// auth middleware once it owns the response headers.
#[derive(Clone, Debug)]
pub enum CookieUpdate {
    Set {
        access_token: String,
        refresh_token: String,
    },
    Clear,
}

/// Outbox the middleware plants in request extensions. Server functions
/// run deep inside the handler and never see the response, so they
/// drop their cookie change here instead.
#[derive(Clone, Debug, Default)]
pub struct CookieOutbox(pub Arc<Mutex<Option<CookieUpdate>>>);

fn stash(action: CookieUpdate) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(outbox) = parts.extensions.get::<CookieOutbox>() {
            *outbox.0.lock().unwrap() = Some(action);
        }
    }
}

/// Ask the middleware to set both auth cookies on the way out.
pub fn queue_auth_cookies(access_token: &str, refresh_token: &str) {
    stash(CookieUpdate::Set {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
    });
}

/// Ask the middleware to clear both auth cookies on the way out.
pub fn queue_clear_cookies() {
    stash(CookieUpdate::Clear);
}
