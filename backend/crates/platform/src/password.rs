//! Password Hashing and Verification
//!
//! bcrypt-based password handling with:
//! - A single fixed cost shared by every hashing and verification path
//! - Zeroization of clear text on drop
//! - Verification that never errors (malformed hashes simply do not match)
//!
//! Hashes use the standard `$2b$` modular crypt format, so records written by
//! other bcrypt implementations at the same cost verify unchanged.

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// bcrypt cost factor (2^10 rounds). Must stay identical for every path that
/// hashes or compares admin passwords.
pub const BCRYPT_COST: u32 = 10;

/// bcrypt only consumes the first 72 bytes of input
pub const MAX_PASSWORD_BYTES: usize = 72;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password exceeds what bcrypt can consume
    #[error("Password must be at most {max} bytes (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`; `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a password, rejecting blank input and input bcrypt would truncate
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        if raw.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: raw.len(),
            });
        }

        Ok(Self(raw))
    }

    /// Hash the password with bcrypt at [`BCRYPT_COST`]
    ///
    /// CPU-bound; async callers should run it on the blocking pool.
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        let hash = bcrypt::hash(self.0.as_bytes(), BCRYPT_COST)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword { hash })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// bcrypt hash in modular crypt format (`$2b$10$...`)
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a hash read back from the store without rejecting it
    ///
    /// A corrupt value still loads; it just never verifies.
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self { hash: s.into() }
    }

    /// Whether the hash looks like bcrypt output
    pub fn is_well_formed(&self) -> bool {
        is_bcrypt_format(&self.hash)
    }

    /// Get the hash string for storage
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Returns `false` on mismatch and on any verification failure.
    /// CPU-bound; async callers should run it on the blocking pool.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        bcrypt::verify(password.0.as_bytes(), &self.hash).unwrap_or(false)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

/// `$2a$`, `$2b$`, `$2x$` or `$2y$` prefix followed by a two-digit cost
fn is_bcrypt_format(hash: &str) -> bool {
    let bytes = hash.as_bytes();
    hash.len() == 60
        && hash.starts_with("$2")
        && matches!(bytes.get(2), Some(b'a' | b'b' | b'x' | b'y'))
        && bytes.get(3) == Some(&b'$')
        && bytes.get(4).is_some_and(u8::is_ascii_digit)
        && bytes.get(5).is_some_and(u8::is_ascii_digit)
        && bytes.get(6) == Some(&b'$')
}

// ============================================================================
// Tests
// ============================================================================
