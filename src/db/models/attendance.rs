//! Attendance Record Model

use serde::{Deserialize, Serialize};

/// Attendance status - closed variant set; the check-in/out lifecycle
/// only ever writes `Present`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    OnBreak,
}

impl Default for AttendanceStatus {
    fn default() -> Self {
        Self::Present
    }
}

/// One attendance record per employee per calendar day
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: i64,
    /// Calendar date in the business timezone (YYYY-MM-DD)
    pub work_date: String,
    /// Check-in time (Unix millis)
    pub check_in_time: i64,
    /// Check-out time (Unix millis), set exactly once
    pub check_out_time: Option<i64>,
    /// Derived at checkout: elapsed hours rounded to one decimal
    pub hours_worked: f64,
    pub status: AttendanceStatus,
    pub created_at: i64,
}

/// Today's attendance row joined with employee identity (admin view)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TodayAttendanceRow {
    pub id: i64,
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub work_date: String,
    pub check_in_time: i64,
    pub check_out_time: Option<i64>,
    pub hours_worked: f64,
    pub status: AttendanceStatus,
}

/// Check-in / check-out payload
///
/// `employee_id` is only honoured for admin callers acting on another
/// employee's record; everyone else is scoped to their own claims id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceAction {
    #[serde(default)]
    pub employee_id: Option<i64>,
}
