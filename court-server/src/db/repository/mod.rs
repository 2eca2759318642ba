//! Repository Module
//!
//! Function-style CRUD over the SQLite pool. Every function takes
//! `pool: &SqlitePool` (or an open transaction) and returns [`RepoResult`].

// Facility
pub mod court;
pub mod item;

// People
pub mod client;
pub mod employee;

// Pricing
pub mod discount;
pub mod price;
pub mod transaction;

// Reservations
pub mod court_reservation;
pub mod item_reservation;

use shared::error::{AppError, ErrorCode};
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

    /// 业务规则冲突 (预约重叠、资源仍被引用等)
    #[error("{1}")]
    Rule(ErrorCode, String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return RepoError::Validation(
                    "Referenced record does not exist or is still in use".into(),
                );
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Rule(code, msg) => AppError::with_message(code, msg),
            RepoError::Database(msg) => {
                // 记录内部错误但不暴露详细信息
                tracing::error!(error = %msg, "Repository database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Open write transaction
pub type Tx<'a> = sqlx::Transaction<'a, sqlx::Sqlite>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_to_app_error() {
        let err: AppError = RepoError::NotFound("Court 1 not found".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Court 1 not found");

        let err: AppError =
            RepoError::Rule(ErrorCode::ReservationOverlap, "taken".into()).into();
        assert_eq!(err.code, ErrorCode::ReservationOverlap);
        assert_eq!(err.http_status(), http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_database_error_is_not_leaked() {
        let err: AppError = RepoError::Database("disk I/O error at page 7".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("page 7"));
    }
}
