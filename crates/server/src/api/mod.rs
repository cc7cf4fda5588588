// Server functions, grouped by the page that calls them. `auth` is the
// server-only plumbing the groups share.

#[cfg(feature = "server")]
pub(crate) mod auth;

mod account;
pub use account::*;

mod admin;
pub use admin::*;

mod dashboard;
pub use dashboard::*;

mod property;
pub use property::*;
