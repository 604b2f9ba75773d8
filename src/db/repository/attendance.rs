//! Attendance Repository
//!
//! One record per employee per work date; the UNIQUE(employee_id,
//! work_date) constraint is the serialization point for concurrent
//! check-ins.

use super::RepoResult;
use crate::db::models::{AttendanceRecord, TodayAttendanceRow};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, employee_id, work_date, check_in_time, check_out_time, hours_worked, status, created_at";

/// Find the record for (employee, date), if any
pub async fn find_by_employee_and_date(
    pool: &SqlitePool,
    employee_id: i64,
    work_date: &str,
) -> RepoResult<Option<AttendanceRecord>> {
    let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
        "SELECT {COLUMNS} FROM attendance_record WHERE employee_id = ? AND work_date = ?"
    ))
    .bind(employee_id)
    .bind(work_date)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

/// Create the check-in record for (employee, date)
///
/// A concurrent duplicate insert surfaces as `RepoError::Duplicate` via
/// the UNIQUE constraint, never as a generic failure.
pub async fn check_in(
    pool: &SqlitePool,
    employee_id: i64,
    work_date: &str,
    now_millis: i64,
) -> RepoResult<AttendanceRecord> {
    let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
        r#"INSERT INTO attendance_record
            (employee_id, work_date, check_in_time, check_out_time, hours_worked, status, created_at)
           VALUES (?1, ?2, ?3, NULL, 0, 'present', ?3)
           RETURNING {COLUMNS}"#
    ))
    .bind(employee_id)
    .bind(work_date)
    .bind(now_millis)
    .fetch_one(pool)
    .await?;
    Ok(record)
}

/// Set the check-out time and derived hours, exactly once
///
/// Conditional on the record not being checked out yet; returns `None`
/// when a concurrent checkout won the race.
pub async fn check_out(
    pool: &SqlitePool,
    record_id: i64,
    now_millis: i64,
    hours_worked: f64,
) -> RepoResult<Option<AttendanceRecord>> {
    let rows = sqlx::query(
        "UPDATE attendance_record SET check_out_time = ?1, hours_worked = ?2 WHERE id = ?3 AND check_out_time IS NULL",
    )
    .bind(now_millis)
    .bind(hours_worked)
    .bind(record_id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Ok(None);
    }

    let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
        "SELECT {COLUMNS} FROM attendance_record WHERE id = ?"
    ))
    .bind(record_id)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

/// All attendance rows for a date joined with employee identity (admin view)
pub async fn find_all_for_date(
    pool: &SqlitePool,
    work_date: &str,
) -> RepoResult<Vec<TodayAttendanceRow>> {
    let rows = sqlx::query_as::<_, TodayAttendanceRow>(
        r#"SELECT a.id, a.employee_id, e.first_name, e.last_name, e.email, e.department,
                  a.work_date, a.check_in_time, a.check_out_time, a.hours_worked, a.status
           FROM attendance_record a
           JOIN employee e ON e.id = a.employee_id
           WHERE a.work_date = ?
           ORDER BY a.check_in_time"#,
    )
    .bind(work_date)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
