// Integration suite. Every module here drives the HTTP surface of a running
// server; `common` boots one per test and seeds accounts for each role.

#[cfg(test)]
mod common;

#[cfg(test)]
mod health_tests;

#[cfg(test)]
mod auth_flow_tests;

#[cfg(test)]
mod users_role_tests;

#[cfg(test)]
mod property_role_tests;

#[cfg(test)]
mod dashboard_stats_tests;

#[cfg(test)]
mod rate_limit_tests;
