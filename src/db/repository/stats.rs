//! Dashboard Statistics Repository
//!
//! Four independent counts; deliberately not wrapped in one transaction,
//! so the dashboard may be slightly inconsistent under concurrent writes.

use super::RepoResult;
use sqlx::SqlitePool;

/// Count of active employees
pub async fn count_active_employees(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM employee WHERE is_active = 1")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Count of attendance records for the given date with present status
/// (checked-in and checked-out both count)
pub async fn count_present_on(pool: &SqlitePool, work_date: &str) -> RepoResult<i64> {
    let count = sqlx::query_scalar(
        "SELECT COUNT(*) FROM attendance_record WHERE work_date = ? AND status = 'present'",
    )
    .bind(work_date)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Count of leave requests still pending review
pub async fn count_pending_leaves(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM leave_request WHERE status = 'pending'")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Count of distinct non-empty departments among active employees
pub async fn count_distinct_departments(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar(
        "SELECT COUNT(DISTINCT department) FROM employee WHERE is_active = 1 AND department != ''",
    )
    .fetch_one(pool)
    .await?;
    Ok(count)
}
