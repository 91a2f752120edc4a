//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::admin::{Admin, NewAdmin};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Admin credential repository trait
#[trait_variant::make(AdminRepository: Send)]
pub trait LocalAdminRepository {
    /// Find admin by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Admin>>;

    /// Insert a new admin. Fails with `EmailTaken` if the email exists.
    async fn insert(&self, admin: &NewAdmin) -> AuthResult<Admin>;

    /// Delete any admin with this email and insert the given one, atomically
    async fn replace(&self, admin: &NewAdmin) -> AuthResult<Admin>;

    /// Number of admins
    async fn count(&self) -> AuthResult<i64>;
}
