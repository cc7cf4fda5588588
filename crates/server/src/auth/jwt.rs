use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::Role;

const TYP_ACCESS: &str = "access";
const TYP_REFRESH: &str = "refresh";

/// Claims carried by both token kinds. `typ` keeps the short-lived
/// access token and the long-lived refresh token from standing in for
/// each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    /// Role tag as stored ("tenant", "agent", "owner", "admin"). Kept as a
    /// string on the wire; `role()` parses it, degrading unknown tags to
    /// the least-privileged role instead of rejecting the token.
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    /// Random id so two tokens minted in the same second never hash alike.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(default)]
    pub typ: String,
}

impl Claims {
    fn mint(
        user_id: i64,
        email: &str,
        role: Role,
        ttl: Duration,
        typ: &str,
    ) -> (Self, DateTime<Utc>) {
        let now = Utc::now();
        let expires_at = now + ttl;
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role: role.as_str().to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            jti: Some(uuid::Uuid::new_v4().to_string()),
            typ: typ.to_string(),
        };
        (claims, expires_at)
    }

    /// The caller's role as the closed enum the access checks run on.
    pub fn role(&self) -> Role {
        Role::from_str_or_default(&self.role)
    }
}

fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").expect("JWT_SECRET is required to sign tokens")
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub fn access_token_expiry_minutes() -> i64 {
    env_i64("JWT_ACCESS_TOKEN_EXPIRY_MINUTES", 15)
}

pub fn refresh_token_expiry_days() -> i64 {
    env_i64("JWT_REFRESH_TOKEN_EXPIRY_DAYS", 7)
}

fn sign(claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_secret().as_bytes()),
    )
}

fn verify(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

pub fn create_access_token(
    user_id: i64,
    email: &str,
    role: Role,
) -> Result<String, jsonwebtoken::errors::Error> {
    let ttl = Duration::minutes(access_token_expiry_minutes());
    let (claims, _) = Claims::mint(user_id, email, role, ttl, TYP_ACCESS);
    sign(&claims)
}

pub fn create_refresh_token(
    user_id: i64,
    email: &str,
    role: Role,
) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
    let ttl = Duration::days(refresh_token_expiry_days());
    let (claims, expires_at) = Claims::mint(user_id, email, role, ttl, TYP_REFRESH);
    Ok((sign(&claims)?, expires_at))
}

/// Refuses refresh tokens. An empty `typ` still passes so sessions
/// issued before the tag existed survive a deploy.
pub fn validate_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    match verify(token)? {
        claims if claims.typ == TYP_REFRESH => {
            Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into())
        }
        claims => Ok(claims),
    }
}

/// Requires `typ: "refresh"`. Access tokens and untagged tokens are
/// refused here; only the dedicated refresh flow accepts long-lived
/// credentials.
pub fn validate_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    match verify(token)? {
        claims if claims.typ == TYP_REFRESH => Ok(claims),
        _ => Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into()),
    }
}

/// Hex SHA-256 of a raw token. The database stores only this hash;
/// the raw refresh token lives in the client cookie alone.
pub fn hash_token(raw_token: &str) -> String {
    let digest = Sha256::digest(raw_token.as_bytes());
    format!("{digest:x}")
}
