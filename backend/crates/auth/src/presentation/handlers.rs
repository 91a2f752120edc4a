//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{AdminClaims, TokenService};
use crate::application::{BootstrapUseCase, SignInInput, SignInUseCase};
use crate::domain::repository::AdminRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, RecreateAdminResponse, VerifyResponse,
};
use crate::presentation::middleware::AdminGuard;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl<R> AuthAppState<R>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let tokens = Arc::new(TokenService::new(&config));
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens,
        }
    }

    /// Middleware state sharing this state's token service
    pub fn guard(&self) -> AdminGuard {
        AdminGuard::new(self.tokens.clone())
    }

    pub fn bootstrap(&self) -> BootstrapUseCase<R> {
        BootstrapUseCase::new(self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/admin/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.tokens.clone());
    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful",
        token: output.token,
        email: output.email,
        name: output.name,
    }))
}

// ============================================================================
// Verify
// ============================================================================

/// GET /api/admin/verify
pub async fn verify(Extension(claims): Extension<AdminClaims>) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        email: claims.email,
        name: claims.name,
    })
}

// ============================================================================
// Recreate
// ============================================================================

/// POST /api/admin/create
pub async fn recreate_admin<R>(
    State(state): State<AuthAppState<R>>,
    Extension(claims): Extension<AdminClaims>,
) -> AuthResult<Json<RecreateAdminResponse>>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    tracing::warn!(requested_by = %claims.sub, "Recreating bootstrap admin over HTTP");

    let recreated = state.bootstrap().recreate().await?;

    Ok(Json(RecreateAdminResponse {
        message: "Admin recreated successfully",
        email: recreated.email,
        password: recreated.password,
    }))
}
