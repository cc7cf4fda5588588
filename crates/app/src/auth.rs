use dioxus::prelude::*;
use shared_types::{AccessPolicy, AuthUser, Role, Session};

use crate::routes::{ADMINS, MANAGERS, OUTREACH, STAFF};

/// Client-side session cache, provided as context at the app root.
///
/// `current_user` holds whatever the auth source last answered; `resolved`
/// flips true once the first answer lands. The pair projects into a
/// [`Session`] for access checks; everything else (navbar identity, the
/// profile form, sidebar filtering) reads `current_user` directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_user: Signal<Option<AuthUser>>,
    pub resolved: Signal<bool>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            current_user: Signal::new(None),
            resolved: Signal::new(false),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().is_some()
    }

    pub fn set_user(&mut self, user: AuthUser) {
        self.current_user.set(Some(user));
        self.resolved.set(true);
    }

    pub fn clear_user(&mut self) {
        self.current_user.set(None);
        self.resolved.set(true);
    }

    /// The guard-facing view of this state.
    pub fn session(&self) -> Session {
        if *self.resolved.read() {
            Session::resolved(self.current_user.read().clone())
        } else {
            Session::Pending
        }
    }
}

/// Read the auth context.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// Hook yielding the session projection of the auth context.
pub fn use_session() -> Session {
    use_auth().session()
}

/// The signed-in user's role, if any.
pub fn use_role() -> Option<Role> {
    use_auth().current_user.with(|u| u.as_ref().map(|user| user.role))
}

/// Which sidebar groups the current role should see.
///
/// Computed from the same policy constants the route guard enforces, so the
/// sidebar can never link somewhere the guard would refuse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavSections {
    pub management: bool,
    pub financial: bool,
    pub communications: bool,
    pub administration: bool,
}

pub fn use_nav_sections() -> NavSections {
    let role = use_role();
    let permitted = |policy: AccessPolicy| role.is_some_and(|r| policy.permits(r));

    NavSections {
        management: permitted(STAFF),
        financial: permitted(MANAGERS),
        communications: permitted(OUTREACH),
        administration: permitted(ADMINS),
    }
}
