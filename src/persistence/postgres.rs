//! PostgreSQL implementation of [`WaitlistStore`].

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::{UserRow, WaitlistEntryRow};
use crate::config::WaitlistConfig;
use crate::domain::{NewUser, NewWaitlistEntry, StoreError, User, WaitlistEntry, WaitlistStore};

const ENTRY_COLUMNS: &str = "id, email, name, message, source, created_at";

/// PostgreSQL-backed store using `sqlx::PgPool`.
///
/// Atomicity of check-then-insert comes from the `UNIQUE` constraints on
/// `waitlist_entries.email` and `users.username`; a violation is reported
/// as the matching `Duplicate*` [`StoreError`].
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Opens a connection pool from `config` and, if enabled, applies the
    /// embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the pool cannot connect or a
    /// migration fails.
    pub async fn connect(config: &WaitlistConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(backend)?;

        let store = Self { pool };
        if config.database_run_migrations {
            store.migrate().await?;
        }
        Ok(store)
    }

    /// Applies migrations from `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        tracing::info!("database migrations applied");
        Ok(())
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl WaitlistStore for PostgresStore {
    async fn create_entry(&self, entry: NewWaitlistEntry) -> Result<WaitlistEntry, StoreError> {
        let sql = format!(
            "INSERT INTO waitlist_entries (email, name, message, source) \
             VALUES ($1, $2, $3, $4) RETURNING {ENTRY_COLUMNS}"
        );
        let result = sqlx::query_as::<_, WaitlistEntryRow>(&sql)
            .bind(&entry.email)
            .bind(entry.resolved_name())
            .bind(entry.resolved_message())
            .bind(entry.resolved_source())
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateEmail(entry.email)),
            Err(e) => Err(backend(e)),
        }
    }

    async fn get_entry_by_email(&self, email: &str) -> Result<Option<WaitlistEntry>, StoreError> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM waitlist_entries WHERE email = $1");
        let row = sqlx::query_as::<_, WaitlistEntryRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        Ok(row.map(Into::into))
    }

    async fn count_entries(&self) -> Result<u64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM waitlist_entries")
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;
        u64::try_from(count).map_err(|_| StoreError::Backend(format!("negative count: {count}")))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let result = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (username, password) VALUES ($1, $2) \
             RETURNING id, username, password",
        )
        .bind(&user.username)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateUsername(user.username)),
            Err(e) => Err(backend(e)),
        }
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        Ok(row.map(Into::into))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        Ok(row.map(Into::into))
    }
}
