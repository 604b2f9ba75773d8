//! Employee Management Handlers
//!
//! All routes in this module sit behind `require_admin`.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::core::ServerState;
use crate::db::models::{EmployeeCreate, EmployeeResponse, EmployeeUpdate};
use crate::db::repository::employee;
use crate::utils::validation::{
    validate_email, validate_optional_text, validate_password, validate_required_text,
    MAX_NAME_LEN,
};
use crate::utils::{time, AppError, AppResult};

/// List active employees
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = employee::find_all(&state.pool).await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

/// List all employees including deactivated accounts
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = employee::find_all_with_inactive(&state.pool).await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

/// Get a single employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeeResponse>> {
    let emp = employee::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;
    Ok(Json(emp.into()))
}

/// Create a new employee account
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<(http::StatusCode, Json<EmployeeResponse>)> {
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    validate_required_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.department, "department", MAX_NAME_LEN)?;
    validate_optional_text(&payload.position, "position", MAX_NAME_LEN)?;

    let emp = employee::create(&state.pool, payload, time::now_millis()).await?;

    tracing::info!(employee_id = emp.id, email = %emp.email, "Employee created");
    Ok((http::StatusCode::CREATED, Json(emp.into())))
}

/// Update an employee (any field, including role and active flag)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<EmployeeResponse>> {
    if let Some(ref email) = payload.email {
        validate_email(email)?;
    }
    if let Some(ref password) = payload.password {
        validate_password(password)?;
    }
    validate_optional_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.department, "department", MAX_NAME_LEN)?;
    validate_optional_text(&payload.position, "position", MAX_NAME_LEN)?;

    let emp = employee::update(&state.pool, id, payload, time::now_millis()).await?;
    Ok(Json(emp.into()))
}

/// Delete an employee; owned attendance and leave records cascade
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    employee::delete(&state.pool, id).await?;
    tracing::info!(employee_id = id, "Employee deleted");
    Ok(Json(json!({ "deleted": id })))
}
