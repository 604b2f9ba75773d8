//! HTTP API modules
//!
//! One module per resource; each exposes a `router()` merged into the
//! application router in `core::server`.

pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod leave_requests;
