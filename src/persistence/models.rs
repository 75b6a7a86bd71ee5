//! Database row models for waitlist entries and users.

use chrono::{DateTime, Utc};

use crate::domain::{User, WaitlistEntry};

/// A row from the `waitlist_entries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WaitlistEntryRow {
    /// `BIGSERIAL` primary key.
    pub id: i64,
    /// Unique email.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Optional free-text message.
    pub message: Option<String>,
    /// Provenance tag.
    pub source: String,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<WaitlistEntryRow> for WaitlistEntry {
    fn from(row: WaitlistEntryRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            message: row.message,
            source: row.source,
            created_at: row.created_at,
        }
    }
}

/// A row from the `users` table.
#[derive(Clone, sqlx::FromRow)]
pub struct UserRow {
    /// `BIGSERIAL` primary key.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Opaque credential.
    pub password: String,
}

impl std::fmt::Debug for UserRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRow")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password: row.password,
        }
    }
}
