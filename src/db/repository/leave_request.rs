//! Leave Request Repository
//!
//! Pending -> approved|rejected exactly once. The decision is a
//! conditional update (`WHERE status = 'pending'`) so two concurrent
//! reviewers cannot both succeed.

use super::RepoResult;
use crate::db::models::{LeaveRequest, LeaveStatus, LeaveType, PendingLeaveRow};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, employee_id, leave_type, start_date, end_date, reason, status, reviewed_by, reviewed_at, review_comments, days_requested, created_at, updated_at";

/// Create a new request in pending state
#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &SqlitePool,
    employee_id: i64,
    leave_type: LeaveType,
    start_date: &str,
    end_date: &str,
    reason: Option<String>,
    days_requested: i64,
    now: i64,
) -> RepoResult<LeaveRequest> {
    let request = sqlx::query_as::<_, LeaveRequest>(&format!(
        r#"INSERT INTO leave_request
            (employee_id, leave_type, start_date, end_date, reason, status, days_requested, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, 'pending', ?6, ?7, ?7)
           RETURNING {COLUMNS}"#
    ))
    .bind(employee_id)
    .bind(leave_type)
    .bind(start_date)
    .bind(end_date)
    .bind(reason)
    .bind(days_requested)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(request)
}

/// Find a request by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<LeaveRequest>> {
    let request = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {COLUMNS} FROM leave_request WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(request)
}

/// All requests owned by an employee, newest first
pub async fn list_by_employee(pool: &SqlitePool, employee_id: i64) -> RepoResult<Vec<LeaveRequest>> {
    let requests = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {COLUMNS} FROM leave_request WHERE employee_id = ? ORDER BY created_at DESC"
    ))
    .bind(employee_id)
    .fetch_all(pool)
    .await?;
    Ok(requests)
}

/// All pending requests joined with the submitting employee, newest first
pub async fn list_pending(pool: &SqlitePool) -> RepoResult<Vec<PendingLeaveRow>> {
    let rows = sqlx::query_as::<_, PendingLeaveRow>(
        r#"SELECT l.id, l.employee_id, e.first_name, e.last_name, e.email, e.department,
                  l.leave_type, l.start_date, l.end_date, l.reason, l.days_requested, l.created_at
           FROM leave_request l
           JOIN employee e ON e.id = l.employee_id
           WHERE l.status = 'pending'
           ORDER BY l.created_at DESC"#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Transition a pending request to a terminal state
///
/// Atomic read-then-write: the update only matches while the request is
/// still pending. Returns `None` when it matched nothing - the caller
/// distinguishes "gone" from "already decided" by probing the row.
pub async fn decide(
    pool: &SqlitePool,
    id: i64,
    status: LeaveStatus,
    reviewer_id: i64,
    comments: Option<String>,
    now: i64,
) -> RepoResult<Option<LeaveRequest>> {
    let rows = sqlx::query(
        r#"UPDATE leave_request
           SET status = ?1, reviewed_by = ?2, reviewed_at = ?3, review_comments = ?4, updated_at = ?3
           WHERE id = ?5 AND status = 'pending'"#,
    )
    .bind(status)
    .bind(reviewer_id)
    .bind(now)
    .bind(comments)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}
