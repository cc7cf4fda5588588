use dioxus::prelude::*;
use shared_types::DashboardStats;

#[cfg(feature = "server")]
use crate::db::get_db;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, SqlxErrorExt};

#[cfg(feature = "server")]
use crate::auth::guards::{RoutePolicy, Staff};

#[cfg(feature = "server")]
use super::auth::*;

/// Aggregated portfolio statistics for the staff dashboard widgets.
/// Tenant dashboards never call this; their view has no portfolio data.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_dashboard_stats() -> Result<DashboardStats, ServerFnError> {
    use shared_types::Property;

    require_policy(Staff::POLICY)?;

    let db = get_db().await;

    let total_properties = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM properties")
        .fetch_one(db)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?;

    let (total_units, occupied_units) = sqlx::query_as::<_, (i64, i64)>(
        r#"SELECT COALESCE(SUM(unit_count), 0), COALESCE(SUM(occupied_count), 0)
           FROM properties WHERE status = 'active'"#,
    )
    .fetch_one(db)
    .await
    .map_err(|e| e.into_app_error().into_server_fn_error())?;

    let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())?;

    let recent_properties = sqlx::query_as::<_, Property>(
        r#"SELECT id, name, address_line, city, state, postal_code, property_type,
                  unit_count, occupied_count, status, created_at
           FROM properties ORDER BY created_at DESC LIMIT 5"#,
    )
    .fetch_all(db)
    .await
    .map_err(|e| e.into_app_error().into_server_fn_error())?;

    Ok(DashboardStats {
        total_properties,
        total_units,
        occupied_units,
        total_users,
        recent_properties,
    })
}
