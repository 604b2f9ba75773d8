//! Repository Module
//!
//! CRUD operations for the SQLite tables. Repositories are plain async
//! functions over a `SqlitePool`; all timestamps cross this boundary as
//! `i64` Unix millis and dates as `YYYY-MM-DD` strings.

pub mod attendance;
pub mod employee;
pub mod leave_request;
pub mod stats;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        // Uniqueness violations are anticipated (concurrent check-in,
        // duplicate email) and must stay distinguishable from generic
        // storage failures.
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
