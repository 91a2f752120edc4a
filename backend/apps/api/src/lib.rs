//! Problem Tracker API
//!
//! Router composition and startup pieces shared by the binary and the
//! end-to-end tests.

pub mod config;
pub mod health;
pub mod startup;

use auth::{AuthAppState, AuthConfig, SqliteAdminRepository, admin_router_generic};
use axum::http::{HeaderValue, Method, header};
use axum::{Router, routing::get};
use platform::database::Database;
use problems::{SqliteProblemRepository, problems_router};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// Everything the router needs, sharing one store handle
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth: AuthAppState<SqliteAdminRepository>,
    pub problems: SqliteProblemRepository,
}

impl AppState {
    pub fn new(db: Database, auth_config: AuthConfig) -> Self {
        Self {
            auth: AuthAppState::new(SqliteAdminRepository::new(db.clone()), auth_config),
            problems: SqliteProblemRepository::new(db.clone()),
            db,
        }
    }
}

/// Compose all routes. Transport layers (tracing, CORS) are added by the caller.
pub fn build_router(state: AppState) -> Router {
    let guard = state.auth.guard();

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(state.db.clone())
        .nest("/api/admin", admin_router_generic(state.auth))
        .nest("/api/problems", problems_router(state.problems, guard))
        .fallback(health::not_found)
        .method_not_allowed_fallback(health::method_not_allowed)
}

pub fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}
