//! Time helpers — business timezone conversion
//!
//! All date/timestamp conversion happens at the API handler layer;
//! the repository layer only receives `i64` Unix millis and
//! `YYYY-MM-DD` date strings.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Current time as Unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Calendar date of `now_millis` in the business timezone
///
/// The day boundary for attendance is midnight-to-midnight in the
/// configured timezone, not the host's local clock.
pub fn work_date(now_millis: i64, tz: Tz) -> String {
    let dt = chrono::DateTime::from_timestamp_millis(now_millis)
        .unwrap_or_else(|| Utc::now().into())
        .with_timezone(&tz);
    dt.date_naive().format("%Y-%m-%d").to_string()
}

/// Inclusive day count between two dates (both endpoints counted)
///
/// Caller must have verified `end >= start`.
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days() + 1
}

/// Elapsed hours between two millis timestamps, rounded half-up to one decimal
pub fn elapsed_hours(check_in_millis: i64, check_out_millis: i64) -> f64 {
    let hours = (check_out_millis - check_in_millis) as f64 / 3_600_000.0;
    (hours * 10.0).round() / 10.0
}
