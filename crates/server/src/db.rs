use axum::extract::FromRef;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// State handed to the Axum side of the house. `FromRef` lets handlers ask
/// for `State<PgPool>` without naming the struct.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Pool<Postgres>,
}

// Both statics stay unset until something actually queries. Opening
// connections eagerly would pin the pool to whichever tokio runtime ran
// first, and under `#[tokio::test]` every test brings its own.
static POOL: OnceLock<Pool<Postgres>> = OnceLock::new();
static MIGRATED: AtomicBool = AtomicBool::new(false);

/// Build the pool from `DATABASE_URL`, deferring connections until first use.
pub fn create_pool() -> Pool<Postgres> {
    // In production the variables come from the environment; .env covers dev.
    let _ = dotenvy::dotenv();

    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(&url)
        .expect("parse DATABASE_URL")
}

/// Apply pending migrations.
pub async fn run_migrations(pool: &Pool<Postgres>) {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .expect("apply database migrations");
}

/// The process-wide pool for Dioxus server functions, which share one
/// long-lived runtime. REST handlers get theirs through [`AppState`] instead.
///
/// The first caller also migrates; `swap` makes sure that happens once even
/// if several server functions race here on a cold start.
pub async fn get_db() -> &'static Pool<Postgres> {
    let pool = POOL.get_or_init(create_pool);

    if !MIGRATED.swap(true, Ordering::SeqCst) {
        run_migrations(pool).await;
    }

    pool
}

/// Insert a small demo portfolio when the `demo_data` flag is on and the
/// properties table is empty. Gives a fresh install something to show on
/// the dashboard without touching a populated database.
pub async fn seed_demo_data(pool: &Pool<Postgres>) {
    let existing: Result<i64, _> = sqlx::query_scalar("SELECT COUNT(*) FROM properties")
        .fetch_one(pool)
        .await;

    match existing {
        Ok(0) => {}
        Ok(_) => return,
        Err(e) => {
            tracing::warn!(%e, "Demo seed skipped: could not count properties");
            return;
        }
    }

    let rows = [
        ("Maple Court", "12 Maple St", "Portland", "OR", "97201", "apartment", 10, 7),
        ("Birchwood Duplex", "88 Birch Ave", "Portland", "OR", "97209", "duplex", 2, 2),
        ("Harbor View Flats", "301 Seawall Rd", "Astoria", "OR", "97103", "apartment", 16, 11),
    ];

    for (name, address_line, city, state, postal_code, property_type, units, occupied) in rows {
        let result = sqlx::query(
            r#"
            INSERT INTO properties
                (name, address_line, city, state, postal_code, property_type, unit_count, occupied_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(name)
        .bind(address_line)
        .bind(city)
        .bind(state)
        .bind(postal_code)
        .bind(property_type)
        .bind(units)
        .bind(occupied)
        .execute(pool)
        .await;

        if let Err(e) = result {
            tracing::warn!(property = name, %e, "Demo seed insert failed");
        }
    }

    tracing::info!("Seeded demo portfolio ({} properties)", rows.len());
}
