//! Leave Request Model

use serde::{Deserialize, Serialize};

/// Leave category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum LeaveType {
    Sick,
    Vacation,
    Personal,
    Emergency,
}

/// Leave request workflow status: pending is the only non-terminal state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// Leave request entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaveRequest {
    pub id: i64,
    pub employee_id: i64,
    pub leave_type: LeaveType,
    /// Start date (YYYY-MM-DD)
    pub start_date: String,
    /// End date (YYYY-MM-DD), >= start_date
    pub end_date: String,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    /// Reviewing admin; null until decided
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<i64>,
    pub review_comments: Option<String>,
    /// Inclusive day count between start and end dates
    pub days_requested: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Pending request joined with the submitting employee (review queue)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PendingLeaveRow {
    pub id: i64,
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub leave_type: LeaveType,
    pub start_date: String,
    pub end_date: String,
    pub reason: Option<String>,
    pub days_requested: i64,
    pub created_at: i64,
}

/// Submit payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestCreate {
    pub leave_type: LeaveType,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Review decision payload - only terminal states are accepted; serde
/// rejects `pending` and anything outside the closed status set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDecision {
    pub status: LeaveDecisionStatus,
    #[serde(default)]
    pub review_comments: Option<String>,
}

/// The two permitted decision outcomes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeaveDecisionStatus {
    Approved,
    Rejected,
}

impl From<LeaveDecisionStatus> for LeaveStatus {
    fn from(d: LeaveDecisionStatus) -> Self {
        match d {
            LeaveDecisionStatus::Approved => LeaveStatus::Approved,
            LeaveDecisionStatus::Rejected => LeaveStatus::Rejected,
        }
    }
}
