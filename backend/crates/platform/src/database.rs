//! Database Handle
//!
//! SQLite pool wrapped in a handle with an explicit ready/pending state.
//! Repositories hold a [`Database`] and resolve the pool per call, so a
//! server can start, answer liveness checks, and only later attach the store.

use std::str::FromStr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

/// Default time allowed for establishing the store connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// The store has not been connected yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Database is not ready")]
pub struct StoreUnavailable;

/// Connection / migration failures
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Connection timed out after {0:?}")]
    Timeout(Duration),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

// ============================================================================
// Database Handle
// ============================================================================

/// Shared store handle
///
/// Cloning is cheap; all clones observe the same ready state.
#[derive(Clone, Default)]
pub struct Database {
    pool: Arc<OnceLock<SqlitePool>>,
}

impl Database {
    /// Handle without a connection yet
    pub fn pending() -> Self {
        Self::default()
    }

    /// Handle backed by an already connected pool
    pub fn ready(pool: SqlitePool) -> Self {
        let db = Self::pending();
        db.mark_ready(pool);
        db
    }

    /// Attach the pool. Returns `false` if a pool was already attached.
    pub fn mark_ready(&self, pool: SqlitePool) -> bool {
        self.pool.set(pool).is_ok()
    }

    pub fn is_ready(&self) -> bool {
        self.pool.get().is_some()
    }

    /// Get the pool, or [`StoreUnavailable`] while pending
    pub fn pool(&self) -> Result<&SqlitePool, StoreUnavailable> {
        self.pool.get().ok_or(StoreUnavailable)
    }

    /// Close the pool if one is attached
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
        }
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("ready", &self.is_ready())
            .finish()
    }
}

// ============================================================================
// Connecting
// ============================================================================

/// Store connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// sqlx SQLite URL, e.g. `sqlite://problems.db?mode=rwc` or `sqlite::memory:`
    pub url: String,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// In-memory databases live only as long as their single connection
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Open the pool and apply migrations, bounded by `connect_timeout`
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    match tokio::time::timeout(config.connect_timeout, open(config)).await {
        Ok(result) => result,
        Err(_) => Err(DatabaseError::Timeout(config.connect_timeout)),
    }
}

/// Fresh in-memory database with the schema applied
pub async fn connect_in_memory() -> Result<SqlitePool, DatabaseError> {
    connect(&DatabaseConfig::new("sqlite::memory:")).await
}

async fn open(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    let in_memory = config.is_in_memory();

    let mut options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let mut pool_options = SqlitePoolOptions::new().acquire_timeout(config.connect_timeout);

    if in_memory {
        // One connection that is never recycled, or the data disappears with it
        pool_options = pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    } else {
        options = options.journal_mode(SqliteJournalMode::Wal);
        pool_options = pool_options.max_connections(5);
    }

    let pool = pool_options.connect_with(options).await?;

    sqlx::migrate!("../../database/migrations").run(&pool).await?;

    tracing::info!(in_memory, "Database connected and migrated");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_unavailable() {
        let db = Database::pending();
        assert!(!db.is_ready());
        assert_eq!(db.pool().err(), Some(StoreUnavailable));
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(DatabaseConfig::new("sqlite::memory:").is_in_memory());
        assert!(DatabaseConfig::new("sqlite://file.db?mode=memory").is_in_memory());
        assert!(!DatabaseConfig::new("sqlite://problems.db?mode=rwc").is_in_memory());
    }

    #[tokio::test]
    async fn test_mark_ready_once() {
        let db = Database::pending();
        let clone = db.clone();

        let pool = connect_in_memory().await.unwrap();
        assert!(db.mark_ready(pool));
        assert!(clone.is_ready());

        let second = connect_in_memory().await.unwrap();
        assert!(!clone.mark_ready(second));
    }

    #[tokio::test]
    async fn test_migrations_create_tables() {
        let pool = connect_in_memory().await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('admins', 'problems') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(tables, vec!["admins".to_string(), "problems".to_string()]);
    }

    #[tokio::test]
    async fn test_status_check_constraint() {
        let pool = connect_in_memory().await.unwrap();

        let result = sqlx::query(
            "INSERT INTO problems (name, contact_no, status, problem) VALUES ('a', '1', 'Retired', 'p')",
        )
        .execute(&pool)
        .await;

        assert!(result.is_err());
    }
}
