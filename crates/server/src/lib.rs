// Server functions are declared for every target so the client can
// call them; everything below the cfg line needs axum, sqlx, or the
// signing keys and only exists in the server build.
pub mod api;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod db;
#[cfg(feature = "server")]
pub mod error_convert;
#[cfg(feature = "server")]
pub mod health;
#[cfg(feature = "server")]
pub mod openapi;
#[cfg(feature = "server")]
pub mod rate_limit;
#[cfg(feature = "server")]
pub mod rest;
#[cfg(feature = "server")]
pub mod telemetry;
