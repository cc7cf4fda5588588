use crate::auth::use_session;
use dioxus::prelude::*;
use shared_types::{evaluate, AccessDecision, AccessPolicy};

/// Evaluate the current session against a policy.
pub fn use_access(policy: AccessPolicy) -> AccessDecision {
    let session = use_session();
    evaluate(&session, &policy)
}

/// Conditionally render children based on the caller's role.
///
/// In-page counterpart of the route guard, for fragments inside an already
/// authorized page (action buttons, management-only panels). Shows
/// `fallback` (empty by default) unless the session is signed in with a
/// permitted role; unresolved and signed-out sessions also get the
/// fallback, never the children.
#[component]
pub fn RequireRoles(
    policy: AccessPolicy,
    #[props(default)] fallback: Element,
    children: Element,
) -> Element {
    match use_access(policy) {
        AccessDecision::Authorized => rsx! { {children} },
        _ => rsx! { {fallback} },
    }
}
