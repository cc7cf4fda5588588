// Types shared by the app and server crates. Everything here compiles to
// wasm; server-only derives hide behind the `openapi` and `validation`
// features.

pub mod access;
pub mod error;
pub mod feature_flags;

// Account / auth types
pub mod models;
pub mod requests;

// Keystead domain modules
pub mod property;

pub use access::*;
pub use error::*;
pub use feature_flags::*;
pub use models::*;
pub use property::*;
pub use requests::*;
