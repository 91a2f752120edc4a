//! Sign In Use Case
//!
//! Authenticates an admin by email and password and issues a token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::hashing::{verify_password, verify_unknown_admin};
use crate::application::token::TokenService;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub token: String,
    pub email: String,
    pub name: Option<String>,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> SignInUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let (email, password) = match (input.email, input.password) {
            (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => (e, p),
            _ => return Err(AuthError::MissingCredentials),
        };

        // Every failure past this point looks the same to the caller
        let email = Email::new(&email).map_err(|_| AuthError::InvalidCredentials)?;
        let password =
            ClearTextPassword::new(password).map_err(|_| AuthError::InvalidCredentials)?;

        let Some(admin) = self.repo.find_by_email(&email).await? else {
            verify_unknown_admin(password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(admin.password_hash.clone(), password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&admin)?;

        tracing::info!(admin_id = %admin.admin_id, "Admin signed in");

        Ok(SignInOutput {
            token,
            email: admin.email.as_str().to_string(),
            name: admin.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::domain::entity::admin::NewAdmin;
    use crate::infra::sqlite::SqliteAdminRepository;
    use platform::database::{Database, connect_in_memory};

    async fn setup() -> (SignInUseCase<SqliteAdminRepository>, Arc<TokenService>) {
        let pool = connect_in_memory().await.unwrap();
        let repo = SqliteAdminRepository::new(Database::ready(pool));

        let hash = ClearTextPassword::new("SecureAdmin@2025".to_string())
            .unwrap()
            .hash()
            .unwrap();
        repo.insert(&NewAdmin::new(
            Email::new("admin@example.com").unwrap(),
            hash,
            Some("Admin User".to_string()),
        ))
        .await
        .unwrap();

        let tokens = Arc::new(TokenService::new(&AuthConfig::new(b"secret".to_vec())));
        (SignInUseCase::new(Arc::new(repo), tokens.clone()), tokens)
    }

    fn input(email: Option<&str>, password: Option<&str>) -> SignInInput {
        SignInInput {
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let (use_case, tokens) = setup().await;

        let output = use_case
            .execute(input(Some("admin@example.com"), Some("SecureAdmin@2025")))
            .await
            .unwrap();

        assert_eq!(output.email, "admin@example.com");
        assert_eq!(output.name.as_deref(), Some("Admin User"));
        let claims = tokens.verify(Some(&output.token)).unwrap();
        assert_eq!(claims.email, "admin@example.com");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_alike() {
        let (use_case, _) = setup().await;

        let wrong_password = use_case
            .execute(input(Some("admin@example.com"), Some("WrongPassword")))
            .await
            .unwrap_err();
        let unknown_email = use_case
            .execute(input(Some("nobody@example.com"), Some("SecureAdmin@2025")))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let (use_case, _) = setup().await;

        for (email, password) in [
            (None, Some("x")),
            (Some("admin@example.com"), None),
            (Some("   "), Some("x")),
            (Some("admin@example.com"), Some("")),
        ] {
            let err = use_case.execute(input(email, password)).await.unwrap_err();
            assert!(matches!(err, AuthError::MissingCredentials));
        }
    }

    #[tokio::test]
    async fn test_malformed_email_is_invalid_credentials() {
        let (use_case, _) = setup().await;
        let err = use_case
            .execute(input(Some("not-an-email"), Some("SecureAdmin@2025")))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
