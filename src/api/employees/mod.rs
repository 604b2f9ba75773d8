//! Employee Management API (admin only)

pub mod handler;

use axum::{
    middleware,
    routing::get,
    Router,
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/employees",
            get(handler::list).post(handler::create),
        )
        .route("/api/employees/all", get(handler::list_all))
        .route(
            "/api/employees/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_admin))
}
