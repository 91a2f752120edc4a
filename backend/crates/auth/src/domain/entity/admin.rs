//! Admin Entity
//!
//! A credential record allowed to use the dashboard. Admins are created by
//! bootstrap or recovery only; there is no self-registration.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{admin_id::AdminId, email::Email};

/// Stored admin
#[derive(Debug, Clone)]
pub struct Admin {
    pub admin_id: AdminId,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Admin about to be inserted; id and timestamp come from the store
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: Email,
    pub password_hash: HashedPassword,
    pub name: Option<String>,
}

impl NewAdmin {
    pub fn new(email: Email, password_hash: HashedPassword, name: Option<String>) -> Self {
        // Blank display names are stored as absent
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Self {
            email,
            password_hash,
            name,
        }
    }
}
