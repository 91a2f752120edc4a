//! Value Object Module

pub mod admin_id;
pub mod email;

pub use admin_id::AdminId;
pub use email::Email;
