//! REST client for the HR backend plus the host-side plumbing the
//! fullstack binary needs (config loading, telemetry, health).

pub mod client;
pub mod config;
pub mod session;

// One module per backend domain
pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod documents;
pub mod employees;
pub mod expenses;
pub mod leave;
pub mod organizations;
pub mod payroll;
pub mod reports;
pub mod training;
pub mod users;

#[cfg(feature = "server")]
pub mod host;

pub use client::ApiClient;
pub use session::Session;
