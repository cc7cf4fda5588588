use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};
use shared_types::{AccessPolicy, AppError, Role};

use super::jwt::Claims;

/// Extractor that requires authentication. Returns 401 if no valid token.
pub struct AuthRequired(pub Claims);

impl<S: Send + Sync> FromRequestParts<S> for AuthRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthRequired)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

/// Extractor that optionally extracts auth claims. Never fails.
pub struct MaybeAuth(pub Option<Claims>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(parts.extensions.get::<Claims>().cloned()))
    }
}

/// An access policy usable as an extractor parameter.
///
/// REST handlers name their policy as a marker type, so the allowed-role
/// list sits next to the endpoint the same way page policies sit next to
/// routes. The membership test itself is `AccessPolicy::permits`; the
/// same decision the page guard runs.
pub trait RoutePolicy: Send + Sync {
    const POLICY: AccessPolicy;
}

/// Portfolio staff: everyone who works the portfolio.
pub struct Staff;
impl RoutePolicy for Staff {
    const POLICY: AccessPolicy = AccessPolicy::roles(&[Role::Admin, Role::Owner, Role::Agent]);
}

/// Portfolio managers: roles allowed to change the portfolio.
pub struct Managers;
impl RoutePolicy for Managers {
    const POLICY: AccessPolicy = AccessPolicy::roles(&[Role::Admin, Role::Owner]);
}

/// Platform administrators.
pub struct Admins;
impl RoutePolicy for Admins {
    const POLICY: AccessPolicy = AccessPolicy::roles(&[Role::Admin]);
}

/// Extractor that requires authentication AND a role admitted by policy `P`.
/// Returns 401 if unauthenticated, 403 if the role is outside the policy.
///
/// This is the HTTP projection of the page guard: on the server a session
/// is always resolved, so only the Unauthenticated (401), Forbidden (403)
/// and Authorized (handler runs) outcomes exist here.
pub struct PolicyGuarded<P: RoutePolicy>(pub Claims, PhantomData<P>);

impl<P: RoutePolicy, S: Send + Sync> FromRequestParts<S> for PolicyGuarded<P> {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        if !P::POLICY.permits(claims.role()) {
            return Err(AppError::forbidden(format!(
                "This operation is limited to: {}",
                P::POLICY.describe()
            )));
        }

        Ok(PolicyGuarded(claims, PhantomData))
    }
}
