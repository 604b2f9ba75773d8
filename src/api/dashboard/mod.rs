//! Dashboard API (admin only)

pub mod handler;

use axum::{middleware, routing::get, Router};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/dashboard/stats", get(handler::stats))
        .layer(middleware::from_fn(require_admin))
}
