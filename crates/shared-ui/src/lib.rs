//! Presentational components shared by every HR Pilot page.
//!
//! Components carry no data fetching or authorization logic; pages pass
//! values and callbacks in.

pub mod components;

pub use components::*;
