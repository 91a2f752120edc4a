//! Admin Bootstrap
//!
//! Guarantees the configured admin exists once the store is ready, and
//! provides the recreate operation used to recover a lost credential.

use std::sync::Arc;

use platform::crypto::random_secret;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::hashing::hash_password;
use crate::domain::entity::admin::NewAdmin;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Length in bytes of generated passwords before encoding (24 chars)
const GENERATED_PASSWORD_BYTES: usize = 18;

/// Result of [`BootstrapUseCase::ensure`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    AlreadyPresent,
}

/// Credential now in effect after a recreate
#[derive(Debug)]
pub struct RecreatedAdmin {
    pub email: String,
    pub password: String,
}

/// Admin bootstrap use case
pub struct BootstrapUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> BootstrapUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Insert the bootstrap admin unless one with that email exists
    pub async fn ensure(&self) -> AuthResult<BootstrapOutcome> {
        let email = Email::new(&self.config.bootstrap.email)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            tracing::debug!(email = %email, "Bootstrap admin already present");
            return Ok(BootstrapOutcome::AlreadyPresent);
        }

        let (password, generated) = self.password()?;
        let admin = self.new_admin(email, password.clone()).await?;

        match self.repo.insert(&admin).await {
            Ok(created) => {
                if generated {
                    // The only time this password is ever shown
                    tracing::warn!(
                        admin_id = %created.admin_id,
                        email = %created.email,
                        password = %password,
                        "Created bootstrap admin with a generated password; store it now or rotate it with `api recreate-admin`"
                    );
                } else {
                    tracing::info!(
                        admin_id = %created.admin_id,
                        email = %created.email,
                        "Created bootstrap admin"
                    );
                }
                Ok(BootstrapOutcome::Created)
            }
            // Another instance won the insert
            Err(AuthError::EmailTaken) => Ok(BootstrapOutcome::AlreadyPresent),
            Err(e) => Err(e),
        }
    }

    /// Replace the bootstrap admin with a freshly hashed credential
    pub async fn recreate(&self) -> AuthResult<RecreatedAdmin> {
        let email = Email::new(&self.config.bootstrap.email)?;
        let (password, _) = self.password()?;

        let admin = self.new_admin(email, password.clone()).await?;
        let created = self.repo.replace(&admin).await?;

        tracing::info!(
            admin_id = %created.admin_id,
            email = %created.email,
            "Recreated bootstrap admin"
        );

        Ok(RecreatedAdmin {
            email: created.email.as_str().to_string(),
            password,
        })
    }

    /// Configured password, or a generated one (flagged `true`)
    fn password(&self) -> AuthResult<(String, bool)> {
        match &self.config.bootstrap.password {
            Some(p) => Ok((p.clone(), false)),
            None => Ok((random_secret(GENERATED_PASSWORD_BYTES), true)),
        }
    }

    async fn new_admin(&self, email: Email, password: String) -> AuthResult<NewAdmin> {
        let password = ClearTextPassword::new(password)
            .map_err(|e| AuthError::PasswordPolicy(e.to_string()))?;
        let hash = hash_password(password).await?;

        Ok(NewAdmin::new(email, hash, self.config.bootstrap.name.clone()))
    }
}
