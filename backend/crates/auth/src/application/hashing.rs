//! Password hashing on the blocking pool

use platform::crypto::random_secret;
use platform::password::{ClearTextPassword, HashedPassword};
use tokio::sync::OnceCell;

use crate::error::{AuthError, AuthResult};

/// Hash off the async executor
pub async fn hash_password(password: ClearTextPassword) -> AuthResult<HashedPassword> {
    tokio::task::spawn_blocking(move || password.hash())
        .await?
        .map_err(|e| AuthError::Internal(e.to_string()))
}

/// Verify off the async executor
pub async fn verify_password(
    hash: HashedPassword,
    password: ClearTextPassword,
) -> AuthResult<bool> {
    Ok(tokio::task::spawn_blocking(move || hash.verify(&password)).await?)
}

/// Hash of a random throwaway password, computed once per process
async fn dummy_hash() -> AuthResult<HashedPassword> {
    static DUMMY_HASH: OnceCell<HashedPassword> = OnceCell::const_new();

    let hash = DUMMY_HASH
        .get_or_try_init(|| async {
            let throwaway = ClearTextPassword::new(random_secret(18))
                .map_err(|e| AuthError::Internal(e.to_string()))?;
            hash_password(throwaway).await
        })
        .await?;

    Ok(hash.clone())
}

/// Burn one bcrypt verification for a login whose email matched nothing,
/// so it takes as long as a wrong password
pub async fn verify_unknown_admin(password: ClearTextPassword) -> AuthResult<()> {
    let hash = dummy_hash().await?;
    verify_password(hash, password).await?;
    Ok(())
}
