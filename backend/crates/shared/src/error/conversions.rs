//! Error conversions - From implementations for common error types
//!
//! Provides the sqlx error classification shared by every crate, and the
//! JSON error envelope used by every HTTP response.

use super::app_error::AppError;
#[cfg(any(feature = "sqlx", test))]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a database error into an [`ErrorKind`] and a client-safe message
///
/// Single source of the sqlx mapping; crate-local error enums call this for
/// their `Database` variants.
#[cfg(feature = "sqlx")]
pub fn classify_sqlx(err: &sqlx::Error) -> (ErrorKind, &'static str) {
    match err {
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Record not found"),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            (ErrorKind::ServiceUnavailable, "Database connection unavailable")
        }
        sqlx::Error::Io(_) => (ErrorKind::ServiceUnavailable, "Database connection error"),
        // Driver-independent constraint classification
        sqlx::Error::Database(db_err) => match db_err.kind() {
            sqlx::error::ErrorKind::UniqueViolation => (ErrorKind::Conflict, "Duplicate key value"),
            sqlx::error::ErrorKind::ForeignKeyViolation => {
                (ErrorKind::Conflict, "Foreign key violation")
            }
            sqlx::error::ErrorKind::NotNullViolation => {
                (ErrorKind::BadRequest, "Required field is null")
            }
            sqlx::error::ErrorKind::CheckViolation => {
                (ErrorKind::BadRequest, "Check constraint violation")
            }
            _ => (ErrorKind::InternalServerError, "Server error"),
        },
        _ => (ErrorKind::InternalServerError, "Server error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = classify_sqlx(&err);
        AppError::new(kind, message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Clients only ever see the message; the source stays in the logs
        let body = serde_json::json!({ "error": self.message() });

        (status, Json(body)).into_response()
    }
}
