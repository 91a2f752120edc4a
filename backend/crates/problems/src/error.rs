//! Problem Error Types
//!
//! Problem-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use platform::database::StoreUnavailable;
use thiserror::Error;

/// Problem-specific result type alias
pub type ProblemResult<T> = Result<T, ProblemError>;

/// Problem-specific error variants
#[derive(Debug, Error)]
pub enum ProblemError {
    /// name, contactNo or problem missing or blank
    #[error("All required fields must be filled")]
    MissingRequiredFields,

    /// status present but not Working/Student/Neither
    #[error("Invalid status value")]
    InvalidStatus,

    #[error("Contact number may only contain digits, spaces, +, -, ( and )")]
    InvalidContactNo,

    #[error("{field} must be at most {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    /// Body or query string could not be parsed
    #[error("{0}")]
    Malformed(String),

    /// No record with this id (or the id cannot exist)
    #[error("Problem not found")]
    NotFound,

    /// Store not connected yet
    #[error("Database is not ready")]
    StoreUnavailable,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProblemError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProblemError::MissingRequiredFields
            | ProblemError::InvalidStatus
            | ProblemError::InvalidContactNo
            | ProblemError::FieldTooLong { .. }
            | ProblemError::Malformed(_) => ErrorKind::BadRequest,
            ProblemError::NotFound => ErrorKind::NotFound,
            ProblemError::StoreUnavailable => ErrorKind::ServiceUnavailable,
            ProblemError::Database(e) => classify_sqlx(e).0,
            ProblemError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ProblemError::Database(e) => {
                tracing::error!(error = %e, "Problem database error");
            }
            ProblemError::Internal(msg) => {
                tracing::error!(message = %msg, "Problem internal error");
            }
            ProblemError::StoreUnavailable => {
                tracing::warn!("Problem request while store is not ready");
            }
            _ => {
                tracing::debug!(error = %self, "Problem error");
            }
        }
    }
}

impl From<ProblemError> for AppError {
    fn from(err: ProblemError) -> Self {
        let kind = err.kind();
        let message = match &err {
            // Details stay in the logs
            _ if kind.is_server_error() => "Server error".to_string(),
            ProblemError::Database(e) => classify_sqlx(e).1.to_string(),
            other => other.to_string(),
        };
        AppError::new(kind, message)
    }
}

impl IntoResponse for ProblemError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<StoreUnavailable> for ProblemError {
    fn from(_: StoreUnavailable) -> Self {
        ProblemError::StoreUnavailable
    }
}

impl From<JsonRejection> for ProblemError {
    fn from(rejection: JsonRejection) -> Self {
        ProblemError::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ProblemError {
    fn from(rejection: QueryRejection) -> Self {
        ProblemError::Malformed(rejection.body_text())
    }
}
