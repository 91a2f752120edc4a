//! Entity Module

pub mod admin;

pub use admin::{Admin, NewAdmin};
