//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::AdminRepository;
use crate::infra::sqlite::SqliteAdminRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_admin;

/// Create the admin router with the SQLite repository
pub fn admin_router(repo: SqliteAdminRepository, config: AuthConfig) -> Router {
    admin_router_generic(AuthAppState::new(repo, config))
}

/// Create a generic admin router for any repository implementation
///
/// Only `/login` is public.
pub fn admin_router_generic<R>(state: AuthAppState<R>) -> Router
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/verify", get(handlers::verify))
        .route("/create", post(handlers::recreate_admin::<R>))
        .route_layer(middleware::from_fn_with_state(state.guard(), require_admin))
        .route("/login", post(handlers::login::<R>))
        .with_state(state)
}
