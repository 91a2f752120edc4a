//! Application Layer
//!
//! Use cases and application services.

pub mod bootstrap;
pub mod config;
pub mod hashing;
pub mod sign_in;
pub mod token;

// Re-exports
pub use bootstrap::{BootstrapOutcome, BootstrapUseCase, RecreatedAdmin};
pub use config::{AuthConfig, BootstrapConfig};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use token::{AdminClaims, TokenService};
