pub mod cookies;
pub mod guards;
pub mod jwt;
pub mod middleware;
pub mod password;

use shared_types::Role;

/// Whether `email` is the bootstrap admin named by `ADMIN_EMAIL`.
///
/// Comparison ignores case; an unset or empty variable designates nobody.
pub fn is_admin_email(email: &str) -> bool {
    std::env::var("ADMIN_EMAIL")
        .map(|admin| !admin.is_empty() && admin.eq_ignore_ascii_case(email))
        .unwrap_or(false)
}

/// Promote the bootstrap admin on sign-in.
///
/// A fresh deployment has no admin to hand out roles, so the account whose
/// email matches `ADMIN_EMAIL` gets raised automatically. Anything going
/// wrong leaves the role as it was; the next login retries.
pub async fn maybe_promote_admin(
    db: &sqlx::PgPool,
    user_id: i64,
    email: &str,
    current_role: Role,
) -> Role {
    if current_role == Role::Admin || !is_admin_email(email) {
        return current_role;
    }

    let update = sqlx::query("UPDATE users SET role = 'admin' WHERE id = $1")
        .bind(user_id)
        .execute(db)
        .await;

    match update {
        Ok(_) => {
            tracing::info!(user_id, email, "promoted bootstrap admin");
            Role::Admin
        }
        Err(e) => {
            tracing::error!(user_id, email, %e, "bootstrap admin promotion failed");
            current_role
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_email_match_is_case_insensitive() {
        std::env::set_var("ADMIN_EMAIL", "ops@keystead.test");
        assert!(is_admin_email("ops@keystead.test"));
        assert!(is_admin_email("OPS@KEYSTEAD.TEST"));
        assert!(!is_admin_email("someone@keystead.test"));
        std::env::remove_var("ADMIN_EMAIL");
    }

    #[test]
    fn empty_admin_email_matches_nothing() {
        std::env::set_var("ADMIN_EMAIL", "");
        assert!(!is_admin_email(""));
        assert!(!is_admin_email("ops@keystead.test"));
        std::env::remove_var("ADMIN_EMAIL");
    }
}
