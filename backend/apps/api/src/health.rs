//! Liveness and readiness endpoints
//!
//! These answer immediately whatever the store state is.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use platform::database::Database;
use serde_json::json;

/// GET /
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Problem Tracker API",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// GET /health
pub async fn health(State(db): State<Database>) -> impl IntoResponse {
    let store = if db.is_ready() { "ready" } else { "pending" };

    Json(json!({
        "status": "healthy",
        "store": store,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// GET /ready
pub async fn ready(State(db): State<Database>) -> Response {
    if db.is_ready() {
        Json(json!({ "ready": true })).into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "Database is not ready" })),
        )
            .into_response()
    }
}

/// Anything unrouted
pub async fn not_found() -> Response {
    kernel::error::app_error::AppError::not_found("Not found").into_response()
}

/// Known path, unsupported method
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}
