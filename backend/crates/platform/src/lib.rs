//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (bcrypt, fixed cost)
//! - Bearer token extraction from request headers
//! - Random secret generation
//! - SQLite connection handling with an explicit ready/pending state

pub mod bearer;
pub mod crypto;
pub mod database;
pub mod password;
