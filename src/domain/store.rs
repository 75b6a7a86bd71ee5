//! Storage abstraction for waitlist entries and users.
//!
//! [`WaitlistStore`] is the single seam between request handling and
//! persistence. Misses are reported as `Ok(None)`; duplicates are typed
//! [`StoreError`] variants so callers can branch on them without string
//! matching. Only [`StoreError::Backend`] represents an actual failure.

use std::fmt::Debug;

use async_trait::async_trait;

use super::user::{NewUser, User};
use super::waitlist_entry::{NewWaitlistEntry, WaitlistEntry};

/// Outcomes a store reports besides success.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The email is already registered.
    #[error("email already registered for waitlist: {0}")]
    DuplicateEmail(String),

    /// The username is already taken.
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// The underlying storage failed (I/O, connectivity, constraint
    /// other than the ones above).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Persistent bookkeeping for waitlist entries and users.
///
/// # Atomicity
///
/// `create_entry` must check email uniqueness and insert in one atomic
/// step: two concurrent calls with the same email yield exactly one
/// `Ok` and one [`StoreError::DuplicateEmail`].
#[async_trait]
pub trait WaitlistStore: Send + Sync + Debug {
    /// Inserts a new entry, assigning `id` and `created_at`.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateEmail`] if the email exists,
    /// [`StoreError::Backend`] on storage failure.
    async fn create_entry(&self, entry: NewWaitlistEntry) -> Result<WaitlistEntry, StoreError>;

    /// Exact-match lookup by email.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on storage failure.
    async fn get_entry_by_email(&self, email: &str) -> Result<Option<WaitlistEntry>, StoreError>;

    /// Total number of stored entries.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on storage failure.
    async fn count_entries(&self) -> Result<u64, StoreError>;

    /// Inserts a new user, assigning `id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateUsername`] if the username exists,
    /// [`StoreError::Backend`] on storage failure.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Lookup by id.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on storage failure.
    async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Lookup by username.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on storage failure.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}
