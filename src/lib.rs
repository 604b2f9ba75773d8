//! Staff Server - employee management backend
//!
//! # Architecture overview
//!
//! Core features of the service:
//!
//! - **Authentication** (`auth`): JWT + Argon2 credential system with
//!   role-based access control
//! - **Database** (`db`): embedded SQLite storage via sqlx
//! - **HTTP API** (`api`): RESTful endpoints for employees, attendance,
//!   leave requests and the admin dashboard
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # configuration, state, server loop
//! ├── auth/          # JWT authentication, role middleware
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models, repositories, migrations
//! └── utils/         # errors, time, validation, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{build_app, build_router, Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;

// Security logging macro - structured events on the "security" target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
