#[macro_use]
mod macros;

pub mod error;
pub mod config;
pub mod fallback;
pub mod filter;

// Access control
pub mod rbac;
pub mod role;
pub mod dashboard;

// HR domain records
pub mod ai_tools;
pub mod attendance;
pub mod common;
pub mod department;
pub mod document;
pub mod employee;
pub mod expense;
pub mod leave;
pub mod organization;
pub mod payroll;
pub mod report;
pub mod samples;
pub mod training;
pub mod user;

pub use error::*;
pub use config::*;
pub use fallback::*;
pub use filter::*;

pub use rbac::*;
pub use role::*;
pub use dashboard::*;

pub use ai_tools::*;
pub use attendance::*;
pub use common::*;
pub use department::*;
pub use document::*;
pub use employee::*;
pub use expense::*;
pub use leave::*;
pub use organization::*;
pub use payroll::*;
pub use report::*;
pub use training::*;
pub use user::*;
