//! Store startup
//!
//! Either connect before serving (fail fast) or serve degraded and keep
//! retrying in the background. The admin bootstrap runs once the store is
//! ready, on whichever path gets there.

use std::time::Duration;

use auth::{AuthAppState, BootstrapOutcome, SqliteAdminRepository};
use platform::database::{self, Database, DatabaseConfig, DatabaseError};
use tokio::task::JoinHandle;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Connect, migrate and attach the pool to `db`
pub async fn connect_store(db: &Database, config: &DatabaseConfig) -> Result<(), DatabaseError> {
    let pool = database::connect(config).await?;

    if !db.mark_ready(pool) {
        tracing::warn!("Store was already attached; keeping the existing pool");
    }

    tracing::info!(in_memory = config.is_in_memory(), "Store connected and migrated");
    Ok(())
}

/// Make sure the bootstrap admin exists. Failures are logged, not fatal.
pub async fn bootstrap_admin(auth: &AuthAppState<SqliteAdminRepository>) {
    match auth.bootstrap().ensure().await {
        Ok(BootstrapOutcome::Created) => {}
        Ok(BootstrapOutcome::AlreadyPresent) => {
            tracing::info!("Bootstrap admin already present");
        }
        Err(e) => {
            tracing::error!(error = %e, "Admin bootstrap failed");
        }
    }
}

/// Retry the store with capped exponential backoff, then bootstrap
pub fn spawn_store_reconnect(
    db: Database,
    config: DatabaseConfig,
    auth: AuthAppState<SqliteAdminRepository>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut backoff = INITIAL_BACKOFF;
        let mut attempt: u32 = 1;

        loop {
            match connect_store(&db, &config).await {
                Ok(()) => break,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        attempt,
                        retry_in_secs = backoff.as_secs(),
                        "Store unavailable; serving degraded"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = next_backoff(backoff);
                    attempt = attempt.saturating_add(1);
                }
            }
        }

        bootstrap_admin(&auth).await;
    })
}

fn next_backoff(current: Duration) -> Duration {
    (current * 2).min(MAX_BACKOFF)
}
