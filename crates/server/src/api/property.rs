use dioxus::prelude::*;
use shared_types::{CreatePropertyRequest, MessageResponse, Property, UpdatePropertyRequest};
use uuid::Uuid;

#[cfg(feature = "server")]
use crate::db::get_db;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, SqlxErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use crate::auth::guards::{Managers, RoutePolicy, Staff};

#[cfg(feature = "server")]
use super::auth::*;

/// List all properties in the portfolio, newest first. Portfolio staff only.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_properties() -> Result<Vec<Property>, ServerFnError> {
    require_policy(Staff::POLICY)?;

    let db = get_db().await;
    let properties = sqlx::query_as::<_, Property>(
        r#"SELECT id, name, address_line, city, state, postal_code, property_type,
                  unit_count, occupied_count, status, created_at
           FROM properties ORDER BY created_at DESC"#,
    )
    .fetch_all(db)
    .await
    .map_err(|e| e.into_app_error().into_server_fn_error())?;

    Ok(properties)
}

/// Get a single property by ID. Portfolio staff only.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_property(property_id: Uuid) -> Result<Property, ServerFnError> {
    require_policy(Staff::POLICY)?;

    let db = get_db().await;
    let property = sqlx::query_as::<_, Property>(
        r#"SELECT id, name, address_line, city, state, postal_code, property_type,
                  unit_count, occupied_count, status, created_at
           FROM properties WHERE id = $1"#,
    )
    .bind(property_id)
    .fetch_optional(db)
    .await
    .map_err(|e| e.into_app_error().into_server_fn_error())?
    .ok_or_else(|| {
        shared_types::AppError::not_found("Property not found").into_server_fn_error()
    })?;

    Ok(property)
}

/// Add a property to the portfolio. Managers only.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn create_property(request: CreatePropertyRequest) -> Result<Property, ServerFnError> {
    use shared_types::{is_valid_property_type, AppError};

    require_policy(Managers::POLICY)?;

    request
        .validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    if !is_valid_property_type(&request.property_type) {
        return Err(AppError::bad_request("Unknown property type").into_server_fn_error());
    }

    let db = get_db().await;
    let property = sqlx::query_as::<_, Property>(
        r#"INSERT INTO properties (name, address_line, city, state, postal_code, property_type, unit_count)
           VALUES ($1, $2, $3, $4, $5, $6, $7)
           RETURNING id, name, address_line, city, state, postal_code, property_type,
                     unit_count, occupied_count, status, created_at"#,
    )
    .bind(&request.name)
    .bind(&request.address_line)
    .bind(&request.city)
    .bind(&request.state)
    .bind(&request.postal_code)
    .bind(&request.property_type)
    .bind(request.unit_count)
    .fetch_one(db)
    .await
    .map_err(|e| e.into_app_error().into_server_fn_error())?;

    tracing::info!(property_id = %property.id, name = %property.name, "Property created");

    Ok(property)
}

/// Update a property. Managers only.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn update_property(
    property_id: Uuid,
    request: UpdatePropertyRequest,
) -> Result<Property, ServerFnError> {
    use shared_types::{is_valid_property_type, AppError};

    require_policy(Managers::POLICY)?;

    request
        .validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    if !is_valid_property_type(&request.property_type) {
        return Err(AppError::bad_request("Unknown property type").into_server_fn_error());
    }
    if !matches!(request.status.as_str(), "active" | "archived") {
        return Err(
            AppError::bad_request("Status must be active or archived").into_server_fn_error()
        );
    }
    if request.occupied_count > request.unit_count {
        return Err(
            AppError::bad_request("Occupied units cannot exceed the unit count")
                .into_server_fn_error(),
        );
    }

    let db = get_db().await;
    let property = sqlx::query_as::<_, Property>(
        r#"UPDATE properties
           SET name = $2, address_line = $3, city = $4, state = $5, postal_code = $6,
               property_type = $7, unit_count = $8, occupied_count = $9, status = $10
           WHERE id = $1
           RETURNING id, name, address_line, city, state, postal_code, property_type,
                     unit_count, occupied_count, status, created_at"#,
    )
    .bind(property_id)
    .bind(&request.name)
    .bind(&request.address_line)
    .bind(&request.city)
    .bind(&request.state)
    .bind(&request.postal_code)
    .bind(&request.property_type)
    .bind(request.unit_count)
    .bind(request.occupied_count)
    .bind(&request.status)
    .fetch_optional(db)
    .await
    .map_err(|e| e.into_app_error().into_server_fn_error())?
    .ok_or_else(|| AppError::not_found("Property not found").into_server_fn_error())?;

    Ok(property)
}

/// Remove a property from the portfolio. Managers only.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_property(property_id: Uuid) -> Result<MessageResponse, ServerFnError> {
    use shared_types::AppError;

    require_policy(Managers::POLICY)?;

    let db = get_db().await;
    let result = sqlx::query("DELETE FROM properties WHERE id = $1")
        .bind(property_id)
        .execute(db)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Property not found").into_server_fn_error());
    }

    Ok(MessageResponse::new("Property removed"))
}
