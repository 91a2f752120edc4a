//! Auth (Admin Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Admin entity, value objects, repository trait
//! - `application/` - Sign-in, token service, bootstrap
//! - `infra/` - SQLite implementation
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Security Model
//! - Passwords hashed with bcrypt at a fixed cost
//! - Stateless HS256 bearer tokens with a fixed lifetime, no revocation
//! - Login failures never reveal whether the email exists
//! - No self-registration: admins come from bootstrap or recreate only

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, BootstrapConfig};
pub use application::token::{AdminClaims, TokenService};
pub use application::{BootstrapOutcome, BootstrapUseCase, RecreatedAdmin};
pub use error::{AuthError, AuthResult};
pub use infra::sqlite::SqliteAdminRepository;
pub use presentation::handlers::AuthAppState;
pub use presentation::middleware::{AdminGuard, require_admin};
pub use presentation::router::{admin_router, admin_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
