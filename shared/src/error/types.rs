//! `AppError` and the JSON error body

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error of a court-server operation
///
/// The code picks the HTTP status; `details` carries the offending ids or
/// fields (e.g. `{"id": 12}` for an unknown court, `{"field": "cost"}` for
/// a rejected amount).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's stock message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach one detail; a repeated key overwrites the earlier value
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Malformed input (400, code 2)
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Connection, migration or query failure (500)
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Body of every non-2xx response: `{"code": 2002, "message": "...", "details": {...}}`
///
/// Successful responses are the plain resource JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.http_status();

        // 业务错误是客户端的事, 只有系统错误记 error
        match self.code.category() {
            ErrorCategory::System => {
                tracing::error!(code = %self.code, message = %self.message, "Request failed");
            }
            _ => tracing::debug!(code = %self.code, message = %self.message, "Request rejected"),
        }

        (status, axum::Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_message() {
        let err = AppError::new(ErrorCode::ReservationAlreadyCheckedOut);
        assert_eq!(err.message, ErrorCode::ReservationAlreadyCheckedOut.message());
        assert!(err.details.is_none());
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::validation("Surname is required")
            .with_detail("field", "surname")
            .with_detail("max", 100)
            .with_detail("max", 120);

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.to_string(), "Surname is required");
        let details = err.details.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details["field"], "surname");
        assert_eq!(details["max"], 120);
    }

    #[test]
    fn test_error_body() {
        let err = AppError::new(ErrorCode::CourtNotFound).with_detail("id", 12);
        let body = ErrorBody::from(&err);
        assert_eq!(body.code, 1001);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], 1001);
        assert_eq!(json["details"]["id"], 12);

        let bare = serde_json::to_value(ErrorBody::from(&AppError::internal("boom"))).unwrap();
        assert!(bare.get("details").is_none());
    }

    #[test]
    fn test_database_error_is_server_side() {
        let err = AppError::database("pool closed");
        assert_eq!(err.code.category(), ErrorCategory::System);
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
