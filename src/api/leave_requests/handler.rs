//! Leave Request Handlers
//!
//! Submission is open to every authenticated employee; the review queue
//! and decisions are admin-only. A request is decided at most once.

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    LeaveDecision, LeaveRequest, LeaveRequestCreate, PendingLeaveRow,
};
use crate::db::repository::leave_request;
use crate::utils::validation::{validate_optional_text, MAX_NOTE_LEN};
use crate::utils::{time, AppError, AppResult};

/// Submit a new leave request
pub async fn submit(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<LeaveRequestCreate>,
) -> AppResult<(http::StatusCode, Json<LeaveRequest>)> {
    let start = time::parse_date(&payload.start_date)?;
    let end = time::parse_date(&payload.end_date)?;
    if end < start {
        return Err(AppError::validation(format!(
            "end_date {} is before start_date {}",
            payload.end_date, payload.start_date
        )));
    }
    validate_optional_text(&payload.reason, "reason", MAX_NOTE_LEN)?;

    let days = time::inclusive_day_count(start, end);
    let request = leave_request::create(
        &state.pool,
        user.id,
        payload.leave_type,
        &payload.start_date,
        &payload.end_date,
        payload.reason,
        days,
        time::now_millis(),
    )
    .await?;

    tracing::info!(
        request_id = request.id,
        employee_id = user.id,
        days_requested = days,
        "Leave request submitted"
    );
    Ok((http::StatusCode::CREATED, Json(request)))
}

/// The caller's own requests, newest first
pub async fn my_requests(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<LeaveRequest>>> {
    let requests = leave_request::list_by_employee(&state.pool, user.id).await?;
    Ok(Json(requests))
}

/// Pending review queue (admin view)
pub async fn pending(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<PendingLeaveRow>>> {
    let rows = leave_request::list_pending(&state.pool).await?;
    Ok(Json(rows))
}

/// Approve or reject a pending request
pub async fn decide(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<LeaveDecision>,
) -> AppResult<Json<LeaveRequest>> {
    validate_optional_text(&payload.review_comments, "review_comments", MAX_NOTE_LEN)?;

    let decided = leave_request::decide(
        &state.pool,
        id,
        payload.status.into(),
        user.id,
        payload.review_comments,
        time::now_millis(),
    )
    .await?;

    match decided {
        Some(request) => {
            tracing::info!(
                request_id = id,
                reviewer_id = user.id,
                status = ?request.status,
                "Leave request decided"
            );
            Ok(Json(request))
        }
        // The conditional update matched nothing: distinguish a missing
        // request from one already in a terminal state.
        None => match leave_request::find_by_id(&state.pool, id).await? {
            Some(_) => Err(AppError::AlreadyDecided),
            None => Err(AppError::not_found(format!(
                "Leave request {} not found",
                id
            ))),
        },
    }
}
