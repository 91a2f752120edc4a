//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Login
// ============================================================================

/// Login request. Fields are optional so that missing ones become a
/// 400 with a readable message instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub email: String,
    pub name: Option<String>,
}

// ============================================================================
// Verify
// ============================================================================

/// Verify response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub valid: bool,
    pub email: String,
    pub name: Option<String>,
}

// ============================================================================
// Recreate
// ============================================================================

/// Recreate admin response, carrying the credential now in effect
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecreateAdminResponse {
    pub message: &'static str,
    pub email: String,
    pub password: String,
}
