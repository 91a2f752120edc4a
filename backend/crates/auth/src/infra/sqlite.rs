//! SQLite Repository Implementation

use chrono::{DateTime, Utc};
use platform::database::Database;
use platform::password::HashedPassword;
use sqlx::SqliteConnection;

use crate::domain::entity::admin::{Admin, NewAdmin};
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{admin_id::AdminId, email::Email};
use crate::error::{AuthError, AuthResult};

/// SQLite-backed admin repository
///
/// Resolves the pool per call, so it can be built before the store is up
/// and answers `StoreUnavailable` until then.
#[derive(Clone, Debug)]
pub struct SqliteAdminRepository {
    db: Database,
}

impl SqliteAdminRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl AdminRepository for SqliteAdminRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Admin>> {
        let pool = self.db.pool()?;

        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT
                admin_id,
                email,
                password_hash,
                name,
                created_at_ms
            FROM admins
            WHERE email = ?
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(pool)
        .await?;

        Ok(row.map(AdminRow::into_admin))
    }

    async fn insert(&self, admin: &NewAdmin) -> AuthResult<Admin> {
        let pool = self.db.pool()?;
        let mut conn = pool.acquire().await?;

        insert_admin(&mut conn, admin).await
    }

    async fn replace(&self, admin: &NewAdmin) -> AuthResult<Admin> {
        let pool = self.db.pool()?;
        let mut tx = pool.begin().await?;

        let removed = sqlx::query("DELETE FROM admins WHERE email = ?")
            .bind(admin.email.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let created = insert_admin(&mut *tx, admin).await?;
        tx.commit().await?;

        tracing::info!(
            admin_id = %created.admin_id,
            removed,
            "Replaced admin record"
        );

        Ok(created)
    }

    async fn count(&self) -> AuthResult<i64> {
        let pool = self.db.pool()?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

async fn insert_admin(conn: &mut SqliteConnection, admin: &NewAdmin) -> AuthResult<Admin> {
    let created_at = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO admins (
            email,
            password_hash,
            name,
            created_at_ms
        ) VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(admin.email.as_str())
    .bind(admin.password_hash.as_str())
    .bind(admin.name.as_deref())
    .bind(created_at.timestamp_millis())
    .execute(&mut *conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => AuthError::EmailTaken,
        other => AuthError::Database(other),
    })?;

    Ok(Admin {
        admin_id: AdminId::from_raw(result.last_insert_rowid()),
        email: admin.email.clone(),
        password_hash: admin.password_hash.clone(),
        name: admin.name.clone(),
        created_at,
    })
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AdminRow {
    admin_id: i64,
    email: String,
    password_hash: String,
    name: Option<String>,
    created_at_ms: i64,
}

impl AdminRow {
    fn into_admin(self) -> Admin {
        let password_hash = HashedPassword::from_stored(self.password_hash);
        if !password_hash.is_well_formed() {
            tracing::warn!(
                admin_id = self.admin_id,
                "Stored admin password hash is malformed; run `api recreate-admin`"
            );
        }

        Admin {
            admin_id: AdminId::from_raw(self.admin_id),
            email: Email::from_db(self.email),
            password_hash,
            name: self.name,
            created_at: DateTime::from_timestamp_millis(self.created_at_ms)
                .unwrap_or(DateTime::UNIX_EPOCH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::database::connect_in_memory;

    async fn repo() -> SqliteAdminRepository {
        let pool = connect_in_memory().await.unwrap();
        SqliteAdminRepository::new(Database::ready(pool))
    }

    fn new_admin(email: &str, hash: &str) -> NewAdmin {
        NewAdmin::new(
            Email::new(email).unwrap(),
            HashedPassword::from_stored(hash),
            Some("Admin User".to_string()),
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = repo().await;
        let created = repo.insert(&new_admin("admin@example.com", "h1")).await.unwrap();

        let found = repo
            .find_by_email(&Email::new("ADMIN@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.admin_id, created.admin_id);
        assert_eq!(found.name.as_deref(), Some("Admin User"));
        assert_eq!(found.password_hash.as_str(), "h1");
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repo = repo().await;
        let found = repo
            .find_by_email(&Email::new("nobody@example.com").unwrap())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_taken() {
        let repo = repo().await;
        repo.insert(&new_admin("admin@example.com", "h1")).await.unwrap();

        let err = repo
            .insert(&new_admin("admin@example.com", "h2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_replace_swaps_record() {
        let repo = repo().await;
        repo.insert(&new_admin("admin@example.com", "old")).await.unwrap();

        repo.replace(&new_admin("admin@example.com", "new")).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        let found = repo
            .find_by_email(&Email::new("admin@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.password_hash.as_str(), "new");
    }

    #[tokio::test]
    async fn test_pending_store_is_unavailable() {
        let repo = SqliteAdminRepository::new(Database::pending());
        let err = repo.count().await.unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable));
    }
}
