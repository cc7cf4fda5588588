use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A managed property in the portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Property {
    pub id: Uuid,
    pub name: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    /// One of "apartment", "single_family", "duplex", "commercial".
    pub property_type: String,
    pub unit_count: i32,
    pub occupied_count: i32,
    /// "active" or "archived".
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Property {
    pub fn vacancy(&self) -> i32 {
        (self.unit_count - self.occupied_count).max(0)
    }

    /// Street address on one line for list rows.
    pub fn short_address(&self) -> String {
        format!("{}, {} {}", self.address_line, self.city, self.state)
    }
}

pub const PROPERTY_TYPES: [&str; 4] = ["apartment", "single_family", "duplex", "commercial"];

pub fn is_valid_property_type(s: &str) -> bool {
    PROPERTY_TYPES.contains(&s)
}

/// Request DTO for adding a property to the portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct CreatePropertyRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Property name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Street address is required"))
    )]
    pub address_line: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "City is required"))
    )]
    pub city: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 2, max = 2, message = "State must be a two-letter code"))
    )]
    pub state: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Postal code is required"))
    )]
    pub postal_code: String,
    pub property_type: String,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, message = "A property has at least one unit"))
    )]
    pub unit_count: i32,
}

/// Request DTO for editing a property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct UpdatePropertyRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Property name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Street address is required"))
    )]
    pub address_line: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "City is required"))
    )]
    pub city: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 2, max = 2, message = "State must be a two-letter code"))
    )]
    pub state: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Postal code is required"))
    )]
    pub postal_code: String,
    pub property_type: String,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, message = "A property has at least one unit"))
    )]
    pub unit_count: i32,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0, message = "Occupied units cannot be negative"))
    )]
    pub occupied_count: i32,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Property {
        Property {
            id: Uuid::nil(),
            name: "Maple Court".into(),
            address_line: "12 Maple St".into(),
            city: "Portland".into(),
            state: "OR".into(),
            postal_code: "97201".into(),
            property_type: "apartment".into(),
            unit_count: 10,
            occupied_count: 7,
            status: "active".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn vacancy_is_units_minus_occupied() {
        assert_eq!(sample().vacancy(), 3);
    }

    #[test]
    fn vacancy_never_goes_negative() {
        let mut p = sample();
        p.occupied_count = 12;
        assert_eq!(p.vacancy(), 0);
    }

    #[test]
    fn short_address_formats_one_line() {
        assert_eq!(sample().short_address(), "12 Maple St, Portland OR");
    }

    #[test]
    fn property_type_validation() {
        assert!(is_valid_property_type("apartment"));
        assert!(is_valid_property_type("commercial"));
        assert!(!is_valid_property_type("castle"));
        assert!(!is_valid_property_type(""));
    }

    #[test]
    fn property_serialization_roundtrip() {
        let p = sample();
        let json = serde_json::to_string(&p).unwrap();
        let parsed: Property = serde_json::from_str(&json).unwrap();
        assert_eq!(p, parsed);
    }
}
