//! Leave Request API

pub mod handler;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/leave-requests", post(handler::submit))
        .route("/api/leave-requests/my", get(handler::my_requests))
        .merge(
            Router::new()
                .route("/api/leave-requests/pending", get(handler::pending))
                .route("/api/leave-requests/{id}/status", put(handler::decide))
                .layer(middleware::from_fn(require_admin)),
        )
}
