//! Attendance Handlers
//!
//! Check-in / check-out against the current work date in the business
//! timezone. One record per employee per day; check-out is one-shot.

use axum::{extract::State, Extension, Json};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{AttendanceAction, AttendanceRecord, TodayAttendanceRow};
use crate::db::repository::{attendance, employee, RepoError};
use crate::utils::{time, AppError, AppResult};

/// Resolve which employee an attendance action applies to
///
/// Admins may act on behalf of another employee via the optional
/// `employee_id` payload field; everyone else is pinned to their own
/// claims id regardless of the payload.
async fn resolve_target(
    state: &ServerState,
    user: &CurrentUser,
    action: Option<AttendanceAction>,
) -> AppResult<i64> {
    let requested = action.and_then(|a| a.employee_id);

    let target = match requested {
        Some(other) if other != user.id => {
            if !user.is_admin() {
                return Err(AppError::forbidden(
                    "Only admins may record attendance for another employee",
                ));
            }
            other
        }
        _ => user.id,
    };

    // FK violations would otherwise surface as opaque database errors
    if employee::find_by_id(&state.pool, target).await?.is_none() {
        return Err(AppError::not_found(format!(
            "Employee {} not found",
            target
        )));
    }
    Ok(target)
}

/// Check in for today
pub async fn check_in(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    action: Option<Json<AttendanceAction>>,
) -> AppResult<(http::StatusCode, Json<AttendanceRecord>)> {
    let target = resolve_target(&state, &user, action.map(|Json(a)| a)).await?;

    let now = time::now_millis();
    let today = time::work_date(now, state.timezone());

    let record = match attendance::check_in(&state.pool, target, &today, now).await {
        Ok(r) => r,
        Err(RepoError::Duplicate(_)) => return Err(AppError::AlreadyCheckedIn),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        employee_id = target,
        work_date = %today,
        "Checked in"
    );
    Ok((http::StatusCode::CREATED, Json(record)))
}

/// Check out for today
pub async fn check_out(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    action: Option<Json<AttendanceAction>>,
) -> AppResult<Json<AttendanceRecord>> {
    let target = resolve_target(&state, &user, action.map(|Json(a)| a)).await?;

    let now = time::now_millis();
    let today = time::work_date(now, state.timezone());

    let open = attendance::find_by_employee_and_date(&state.pool, target, &today)
        .await?
        .ok_or(AppError::NoCheckInFound)?;

    if open.check_out_time.is_some() {
        return Err(AppError::AlreadyCheckedOut);
    }

    let hours = time::elapsed_hours(open.check_in_time, now);
    let record = attendance::check_out(&state.pool, open.id, now, hours)
        .await?
        // Conditional update matched nothing: a concurrent checkout won
        .ok_or(AppError::AlreadyCheckedOut)?;

    tracing::info!(
        employee_id = target,
        work_date = %today,
        hours_worked = record.hours_worked,
        "Checked out"
    );
    Ok(Json(record))
}

/// The caller's own record for today, if any
pub async fn my_records(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Option<AttendanceRecord>>> {
    let today = time::work_date(time::now_millis(), state.timezone());
    let record = attendance::find_by_employee_and_date(&state.pool, user.id, &today).await?;
    Ok(Json(record))
}

/// Today's attendance across all employees (admin view)
pub async fn today(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<TodayAttendanceRow>>> {
    let today = time::work_date(time::now_millis(), state.timezone());
    let rows = attendance::find_all_for_date(&state.pool, &today).await?;
    Ok(Json(rows))
}
