use serde::{Deserialize, Serialize};

/// Portal user role controlling which pages and operations are reachable.
///
/// - `Tenant`: renter account. Sees their own lease, maintenance, and
///   messaging pages; never the portfolio or financial views.
/// - `Agent`: property manager working the portfolio day to day.
/// - `Owner`: landlord; everything an agent sees plus financials.
/// - `Admin`: platform administrator; also the only role that can manage
///   user accounts.
///
/// Roles are a closed set. Access checks are literal membership tests
/// against a page's allowed-role list; no role implicitly contains
/// another, so policies that admit admins say so explicitly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Tenant,
    Agent,
    Owner,
    Admin,
}

impl Role {
    /// Parse from a JWT `role` claim or database column. Unknown values
    /// fall back to the least-privileged role.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "agent" => Role::Agent,
            "owner" => Role::Owner,
            "admin" => Role::Admin,
            _ => Role::Tenant,
        }
    }

    /// Lowercase tag for database / JWT storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tenant => "tenant",
            Role::Agent => "agent",
            Role::Owner => "owner",
            Role::Admin => "admin",
        }
    }

    /// Human-readable label for badges and selects.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Tenant => "Tenant",
            Role::Agent => "Agent",
            Role::Owner => "Owner",
            Role::Admin => "Admin",
        }
    }

    /// All roles, in ascending privilege order. Used by the admin console's
    /// role select.
    pub const ALL: [Role; 4] = [Role::Tenant, Role::Agent, Role::Owner, Role::Admin];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account row as shown in the admin console.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
}

/// Authenticated user info (safe to send to the client).
///
/// The access guard reads only `role`; the rest feeds the layout chrome
/// (navbar identity, profile form).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// Credentials for the sign-in endpoints. Validation runs server-side only;
/// the `validation` feature keeps `validator` out of the wasm build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct LoginRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Enter a valid email address"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 8, message = "Password needs at least 8 characters"))
    )]
    pub password: String,
}

/// New-account payload. Everyone registers as a tenant; roles are raised
/// later from the admin console.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct RegisterRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Display name cannot be empty"))
    )]
    pub display_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 3, message = "Username needs at least 3 characters"))
    )]
    pub username: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Enter a valid email address"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 8, message = "Password needs at least 8 characters"))
    )]
    pub password: String,
}

/// Body of the REST refresh endpoint. The web client never sends this; its
/// refresh token rides the HttpOnly cookie instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Aggregated portfolio statistics for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardStats {
    pub total_properties: i64,
    pub total_units: i64,
    pub occupied_units: i64,
    pub total_users: i64,
    pub recent_properties: Vec<crate::property::Property>,
}

impl DashboardStats {
    /// Occupancy as a whole percentage, 0 when the portfolio is empty.
    pub fn occupancy_pct(&self) -> i64 {
        if self.total_units == 0 {
            0
        } else {
            self.occupied_units * 100 / self.total_units
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_from_str_or_default_known_values() {
        assert_eq!(Role::from_str_or_default("tenant"), Role::Tenant);
        assert_eq!(Role::from_str_or_default("agent"), Role::Agent);
        assert_eq!(Role::from_str_or_default("Agent"), Role::Agent);
        assert_eq!(Role::from_str_or_default("owner"), Role::Owner);
        assert_eq!(Role::from_str_or_default("OWNER"), Role::Owner);
        assert_eq!(Role::from_str_or_default("admin"), Role::Admin);
    }

    #[test]
    fn role_from_str_or_default_unknown_falls_to_tenant() {
        assert_eq!(Role::from_str_or_default(""), Role::Tenant);
        assert_eq!(Role::from_str_or_default("superuser"), Role::Tenant);
        assert_eq!(Role::from_str_or_default("landlord"), Role::Tenant);
    }

    #[test]
    fn role_as_str_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::from_str_or_default(role.as_str()), role);
        }
    }

    #[test]
    fn role_serializes_as_lowercase_tag() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        assert_eq!(serde_json::to_string(&Role::Tenant).unwrap(), r#""tenant""#);
        let parsed: Role = serde_json::from_str(r#""owner""#).unwrap();
        assert_eq!(parsed, Role::Owner);
    }

    #[test]
    fn auth_user_serialization_roundtrip() {
        let user = AuthUser {
            id: 7,
            username: "mreyes".into(),
            display_name: "Marta Reyes".into(),
            email: "marta@example.com".into(),
            role: Role::Agent,
        };

        let json = serde_json::to_string(&user).unwrap();
        let deserialized: AuthUser = serde_json::from_str(&json).unwrap();

        assert_eq!(user, deserialized);
    }

    #[test]
    fn auth_user_missing_role_defaults_to_tenant() {
        let json = r#"{"id": 3, "username": "newbie", "display_name": "New User", "email": "new@example.com"}"#;
        let user: AuthUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Tenant);
    }

    #[test]
    fn user_deserializes_from_api_json() {
        let json = r#"{"id": 42, "username": "demo", "display_name": "Demo User", "email": "demo@example.com", "role": "admin", "created_at": "2025-01-01T00:00:00Z"}"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, 42);
        assert_eq!(user.username, "demo");
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn occupancy_pct_handles_empty_portfolio() {
        let stats = DashboardStats {
            total_properties: 0,
            total_units: 0,
            occupied_units: 0,
            total_users: 1,
            recent_properties: vec![],
        };
        assert_eq!(stats.occupancy_pct(), 0);
    }

    #[test]
    fn occupancy_pct_rounds_down() {
        let stats = DashboardStats {
            total_properties: 2,
            total_units: 3,
            occupied_units: 2,
            total_users: 1,
            recent_properties: vec![],
        };
        assert_eq!(stats.occupancy_pct(), 66);
    }
}
