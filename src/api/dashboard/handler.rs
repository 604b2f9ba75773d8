//! Dashboard Handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::stats;
use crate::utils::{time, AppResult};

/// Aggregate counts shown on the admin dashboard
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_employees: i64,
    pub present_today: i64,
    pub pending_leaves: i64,
    pub departments: i64,
}

/// Dashboard aggregates
///
/// Four independent counts; not transactional, so the numbers may be
/// slightly inconsistent under concurrent writes.
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<DashboardStats>> {
    let today = time::work_date(time::now_millis(), state.timezone());

    let total_employees = stats::count_active_employees(&state.pool).await?;
    let present_today = stats::count_present_on(&state.pool, &today).await?;
    let pending_leaves = stats::count_pending_leaves(&state.pool).await?;
    let departments = stats::count_distinct_departments(&state.pool).await?;

    Ok(Json(DashboardStats {
        total_employees,
        present_today,
        pending_leaves,
        departments,
    }))
}
