//! Database models
//!
//! Entities and payload structs shared by repositories and API handlers.

pub mod attendance;
pub mod employee;
pub mod leave_request;

pub use attendance::{AttendanceAction, AttendanceRecord, AttendanceStatus, TodayAttendanceRow};
pub use employee::{Employee, EmployeeCreate, EmployeeResponse, EmployeeUpdate, ProfileUpdate, Role};
pub use leave_request::{
    LeaveDecision, LeaveDecisionStatus, LeaveRequest, LeaveRequestCreate, LeaveStatus, LeaveType,
    PendingLeaveRow,
};
