//! Auth Middleware
//!
//! Bearer-token gate for admin-only routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer;
use std::sync::Arc;

use crate::application::token::TokenService;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone, Debug)]
pub struct AdminGuard {
    tokens: Arc<TokenService>,
}

impl AdminGuard {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

/// Middleware that requires a valid admin token
///
/// No token → 401, bad or expired token → 403. On success the verified
/// [`AdminClaims`](crate::application::AdminClaims) go into the request
/// extensions.
pub async fn require_admin(
    State(guard): State<AdminGuard>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer(req.headers());
    let claims = guard.tokens.verify(token.as_deref())?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
