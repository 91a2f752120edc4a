//! Token Service
//!
//! Issues and verifies the stateless HS256 bearer tokens that authorize
//! every admin operation. There is no server-side session; a token stays
//! valid until it expires.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::admin::Admin;
use crate::error::{AuthError, AuthResult};

/// Claims carried by an admin token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin id as a string
    pub sub: String,
    /// Admin id
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

/// Signs and verifies admin tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            ttl_secs: config.token_ttl_secs(),
        }
    }

    /// Issue a token for the admin, valid from now
    pub fn issue(&self, admin: &Admin) -> AuthResult<String> {
        self.issue_at(admin, Utc::now())
    }

    /// Issue a token as if it were created at `issued_at`
    pub fn issue_at(&self, admin: &Admin, issued_at: DateTime<Utc>) -> AuthResult<String> {
        let iat = issued_at.timestamp();
        let claims = AdminClaims {
            sub: admin.admin_id.to_string(),
            id: admin.admin_id.get(),
            email: admin.email.as_str().to_string(),
            name: admin.name.clone(),
            iat,
            exp: iat + self.ttl_secs,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Verify a token taken from a request
    ///
    /// `None` means the request carried no token at all.
    pub fn verify(&self, token: Option<&str>) -> AuthResult<AdminClaims> {
        let token = token.ok_or(AuthError::MissingToken)?;

        jsonwebtoken::decode::<AdminClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                AuthError::InvalidToken
            })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
