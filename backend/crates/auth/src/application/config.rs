//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

/// Default bootstrap admin email
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@problemtracker.local";

/// Default bootstrap admin display name
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// Default token lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing tokens
    pub jwt_secret: Vec<u8>,
    /// Token lifetime
    pub token_ttl: Duration,
    /// Bootstrap admin
    pub bootstrap: BootstrapConfig,
}

/// Bootstrap admin settings
#[derive(Clone)]
pub struct BootstrapConfig {
    pub email: String,
    pub name: Option<String>,
    /// Generated at first insert when absent
    pub password: Option<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            name: Some(DEFAULT_ADMIN_NAME.to_string()),
            password: None,
        }
    }
}

impl AuthConfig {
    /// Create config with the given signing secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
            bootstrap: BootstrapConfig::default(),
        }
    }

    /// Create config with a random signing secret (for development)
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        Self::new(platform::crypto::random_bytes(32))
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_bootstrap(mut self, bootstrap: BootstrapConfig) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    /// Get token TTL in seconds, saturating at `i64::MAX`
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("bootstrap", &self.bootstrap)
            .finish()
    }
}

impl fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new(b"secret".to_vec());
        assert_eq!(config.token_ttl_secs(), 86_400);
        assert_eq!(config.bootstrap.email, DEFAULT_ADMIN_EMAIL);
        assert!(config.bootstrap.password.is_none());
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_eq!(a.jwt_secret.len(), 32);
        assert_ne!(a.jwt_secret, b.jwt_secret);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig::with_random_secret().with_bootstrap(BootstrapConfig {
            password: Some("configured-password".to_string()),
            ..BootstrapConfig::default()
        });
        let debug = format!("{config:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("configured-password"));
    }

    #[test]
    fn test_token_ttl_secs_saturates() {
        let config = AuthConfig::new(b"secret".to_vec()).with_token_ttl(Duration::MAX);
        assert_eq!(config.token_ttl_secs(), i64::MAX);
    }
}
