//! Problems Router

use auth::{AdminGuard, require_admin};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::ProblemRepository;
use crate::infra::sqlite::SqliteProblemRepository;
use crate::presentation::handlers::{self, ProblemsAppState};

/// Create the problems router with the SQLite repository
pub fn problems_router(repo: SqliteProblemRepository, guard: AdminGuard) -> Router {
    problems_router_generic(repo, guard)
}

/// Create a generic problems router for any repository implementation
///
/// Every route requires an admin token except `POST /`.
pub fn problems_router_generic<R>(repo: R, guard: AdminGuard) -> Router
where
    R: ProblemRepository + Clone + Send + Sync + 'static,
{
    let state = ProblemsAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", get(handlers::list_problems::<R>))
        .route("/count", get(handlers::count_problems::<R>))
        .route("/recent", get(handlers::recent_problems::<R>))
        .route(
            "/{id}",
            get(handlers::get_problem::<R>).delete(handlers::delete_problem::<R>),
        )
        .route_layer(middleware::from_fn_with_state(guard, require_admin))
        // Added after the layer, so the public submit stays unauthenticated
        .route("/", post(handlers::submit_problem::<R>))
        .with_state(state)
}
