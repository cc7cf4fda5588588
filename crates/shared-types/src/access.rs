use crate::models::{AuthUser, Role};

/// The resolved-or-pending identity of the current caller.
///
/// Produced by the auth source (the `get_current_user` server function on
/// the client, the JWT claims on the server) and only ever read by the
/// guard. A session resolves exactly once per page load: `Pending` until
/// the auth source answers, then permanently `Anonymous` or
/// `Authenticated` for that page instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    /// Identity still being resolved; no authorization call may be made.
    #[default]
    Pending,
    /// Resolution finished with no signed-in user. Auth-source failures
    /// also land here: an identity we cannot resolve is treated as absent.
    Anonymous,
    /// Resolution finished with a signed-in user.
    Authenticated(AuthUser),
}

impl Session {
    /// Build a resolved session from the auth source's answer.
    pub fn resolved(user: Option<AuthUser>) -> Self {
        match user {
            Some(user) => Session::Authenticated(user),
            None => Session::Anonymous,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Session::Pending)
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Session::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }
}

/// The set of roles permitted to view a page.
///
/// Declared as a literal next to each route; `authenticated()` is the
/// explicit default for pages any signed-in user may see. Every route
/// declares one; there is no implicit "no policy" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessPolicy {
    allowed: Option<&'static [Role]>,
}

impl AccessPolicy {
    /// Any signed-in user, regardless of role.
    pub const fn authenticated() -> Self {
        Self { allowed: None }
    }

    /// Only the listed roles. Membership is literal: a policy that should
    /// admit admins must list `Role::Admin`.
    pub const fn roles(allowed: &'static [Role]) -> Self {
        Self { allowed: Some(allowed) }
    }

    /// Whether `role` is permitted by this policy.
    pub fn permits(&self, role: Role) -> bool {
        match self.allowed {
            None => true,
            Some(allowed) => allowed.contains(&role),
        }
    }

    /// True when the policy names specific roles rather than admitting
    /// every signed-in user.
    pub fn is_restricted(&self) -> bool {
        self.allowed.is_some()
    }

    /// The permitted role tags, comma separated, for denial messages.
    pub fn describe(&self) -> String {
        match self.allowed {
            None => "any signed-in user".to_string(),
            Some(allowed) => allowed
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Outcome of one guard evaluation. Exactly one applies per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Session unresolved; render only a transient loading view.
    Pending,
    /// No signed-in user; send the caller to the login page.
    Unauthenticated,
    /// Signed in, but the role is outside the policy; render the static
    /// denial view. Nothing downstream of the guard runs.
    Forbidden,
    /// Signed in and permitted; render the protected content. No
    /// authorization context is passed down; content trusts the guard.
    Authorized,
}

/// Decide what a guarded page renders for this session and policy.
///
/// Checks apply in order, first match wins:
/// 1. an unresolved session is `Pending`, whatever the policy;
/// 2. a resolved session without a user is `Unauthenticated`, whatever
///    the policy;
/// 3. a signed-in user is `Authorized` or `Forbidden` purely by role
///    membership.
///
/// Pure and synchronous. The caller owns the side effects each decision
/// implies (navigation on `Unauthenticated`, rendering otherwise), so
/// re-evaluating on an unchanged session is always safe.
pub fn evaluate(session: &Session, policy: &AccessPolicy) -> AccessDecision {
    match session {
        Session::Pending => AccessDecision::Pending,
        Session::Anonymous => AccessDecision::Unauthenticated,
        Session::Authenticated(user) => {
            if policy.permits(user.role) {
                AccessDecision::Authorized
            } else {
                AccessDecision::Forbidden
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(role: Role) -> AuthUser {
        AuthUser {
            id: 1,
            username: "jdoe".into(),
            display_name: "Jordan Doe".into(),
            email: "jdoe@example.com".into(),
            role,
        }
    }

    const STAFF_ONLY: AccessPolicy = AccessPolicy::roles(&[Role::Admin, Role::Agent]);

    #[test]
    fn pending_wins_over_every_policy() {
        let policies = [
            AccessPolicy::authenticated(),
            STAFF_ONLY,
            AccessPolicy::roles(&[]),
            AccessPolicy::roles(&[Role::Tenant]),
        ];
        for policy in policies {
            assert_eq!(evaluate(&Session::Pending, &policy), AccessDecision::Pending);
        }
    }

    #[test]
    fn anonymous_is_unauthenticated_regardless_of_policy() {
        assert_eq!(
            evaluate(&Session::Anonymous, &AccessPolicy::authenticated()),
            AccessDecision::Unauthenticated
        );
        assert_eq!(
            evaluate(&Session::Anonymous, &STAFF_ONLY),
            AccessDecision::Unauthenticated
        );
    }

    #[test]
    fn membership_decides_between_authorized_and_forbidden() {
        for role in Role::ALL {
            let session = Session::Authenticated(user_with(role));
            let expected = if matches!(role, Role::Admin | Role::Agent) {
                AccessDecision::Authorized
            } else {
                AccessDecision::Forbidden
            };
            assert_eq!(evaluate(&session, &STAFF_ONLY), expected, "role {role}");
        }
    }

    #[test]
    fn default_policy_admits_every_role() {
        for role in Role::ALL {
            let session = Session::Authenticated(user_with(role));
            assert_eq!(
                evaluate(&session, &AccessPolicy::authenticated()),
                AccessDecision::Authorized
            );
        }
    }

    #[test]
    fn empty_role_list_forbids_every_role() {
        let nobody = AccessPolicy::roles(&[]);
        for role in Role::ALL {
            let session = Session::Authenticated(user_with(role));
            assert_eq!(evaluate(&session, &nobody), AccessDecision::Forbidden);
        }
    }

    #[test]
    fn no_implicit_admin_superset() {
        let tenants_only = AccessPolicy::roles(&[Role::Tenant]);
        let session = Session::Authenticated(user_with(Role::Admin));
        assert_eq!(evaluate(&session, &tenants_only), AccessDecision::Forbidden);
    }

    #[test]
    fn reevaluation_is_idempotent() {
        let cases = [
            (Session::Pending, STAFF_ONLY),
            (Session::Anonymous, STAFF_ONLY),
            (Session::Authenticated(user_with(Role::Tenant)), STAFF_ONLY),
            (
                Session::Authenticated(user_with(Role::Admin)),
                AccessPolicy::authenticated(),
            ),
        ];
        for (session, policy) in cases {
            let first = evaluate(&session, &policy);
            let second = evaluate(&session, &policy);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn loading_session_renders_only_the_loading_view() {
        // Even with a user already known to the caller, an unresolved
        // session must not reach an authorization decision.
        assert_eq!(
            evaluate(&Session::Pending, &STAFF_ONLY),
            AccessDecision::Pending
        );
    }

    #[test]
    fn signed_out_visitor_is_sent_to_login() {
        let session = Session::resolved(None);
        assert_eq!(evaluate(&session, &STAFF_ONLY), AccessDecision::Unauthenticated);
    }

    #[test]
    fn tenant_hitting_staff_page_is_forbidden() {
        let session = Session::resolved(Some(user_with(Role::Tenant)));
        assert_eq!(evaluate(&session, &STAFF_ONLY), AccessDecision::Forbidden);
    }

    #[test]
    fn admin_hitting_staff_page_is_authorized() {
        let session = Session::resolved(Some(user_with(Role::Admin)));
        assert_eq!(evaluate(&session, &STAFF_ONLY), AccessDecision::Authorized);
    }

    #[test]
    fn tenant_on_default_policy_page_is_authorized() {
        let session = Session::resolved(Some(user_with(Role::Tenant)));
        assert_eq!(
            evaluate(&session, &AccessPolicy::authenticated()),
            AccessDecision::Authorized
        );
    }

    #[test]
    fn resolved_constructor_maps_presence_to_variant() {
        assert_eq!(Session::resolved(None), Session::Anonymous);
        let user = user_with(Role::Owner);
        assert_eq!(
            Session::resolved(Some(user.clone())),
            Session::Authenticated(user)
        );
    }

    #[test]
    fn describe_lists_allowed_tags() {
        assert_eq!(STAFF_ONLY.describe(), "admin, agent");
        assert_eq!(AccessPolicy::authenticated().describe(), "any signed-in user");
    }

    #[test]
    fn default_policy_is_the_authenticated_default() {
        assert_eq!(AccessPolicy::default(), AccessPolicy::authenticated());
        assert!(!AccessPolicy::default().is_restricted());
        assert!(STAFF_ONLY.is_restricted());
    }
}
