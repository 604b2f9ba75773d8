//! Attendance API

pub mod handler;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/attendance/checkin", post(handler::check_in))
        .route("/api/attendance/checkout", post(handler::check_out))
        .route("/api/attendance/my", get(handler::my_records))
        .merge(
            Router::new()
                .route("/api/attendance/today", get(handler::today))
                .layer(middleware::from_fn(require_admin)),
        )
}
