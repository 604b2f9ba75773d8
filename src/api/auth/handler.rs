//! Authentication Handlers
//!
//! Handles login and the caller's own profile

use std::time::Duration;

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{EmployeeResponse, ProfileUpdate};
use crate::db::repository::employee;
use crate::security_log;
use crate::utils::validation::{validate_optional_text, validate_password, MAX_NAME_LEN};
use crate::utils::{time, AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub employee: EmployeeResponse,
}

/// Login handler
///
/// Authenticates credentials and returns a JWT token. Unknown email and
/// wrong password produce the same response to prevent account
/// enumeration.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let found = employee::find_by_email(&state.pool, &req.email).await?;

    // Fixed delay to prevent timing attacks (before checking the result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let emp = match found {
        Some(e) => {
            let password_valid = e
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                security_log!(
                    "WARN",
                    "login_failed",
                    email = req.email.clone(),
                    reason = "invalid_credentials"
                );
                return Err(AppError::invalid_credentials());
            }

            // Disabled state is only disclosed to a caller holding valid
            // credentials; a bad password gets the generic error above.
            if !e.is_active {
                security_log!(
                    "WARN",
                    "login_failed",
                    email = req.email.clone(),
                    reason = "account_disabled"
                );
                return Err(AppError::forbidden("Account has been disabled"));
            }

            e
        }
        None => {
            security_log!(
                "WARN",
                "login_failed",
                email = req.email.clone(),
                reason = "user_not_found"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .jwt_service()
        .generate_token(emp.id, &emp.email, emp.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        employee_id = emp.id,
        email = %emp.email,
        role = ?emp.role,
        "Employee logged in"
    );

    Ok(Json(LoginResponse {
        token,
        employee: emp.into(),
    }))
}

/// Get the caller's own profile
///
/// Re-reads the employee row so the response reflects edits made after
/// the token was issued; 404 when the account has been deleted.
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<EmployeeResponse>> {
    let emp = employee::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", user.id)))?;
    Ok(Json(emp.into()))
}

/// Update the caller's own profile (restricted field set)
pub async fn update_me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<EmployeeResponse>> {
    validate_optional_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
    if let Some(ref password) = payload.password {
        validate_password(password)?;
    }

    let emp = employee::update_profile(&state.pool, user.id, payload, time::now_millis()).await?;
    Ok(Json(emp.into()))
}
