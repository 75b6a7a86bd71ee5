//! In-process waitlist store.
//!
//! [`MemoryStore`] keeps all state behind one [`tokio::sync::Mutex`], so
//! the email-uniqueness check and the insert happen under the same lock.
//! Suitable for development, tests, and single-instance deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::store::{StoreError, WaitlistStore};
use super::user::{NewUser, User};
use super::waitlist_entry::{NewWaitlistEntry, WaitlistEntry};

/// State guarded by the store lock.
///
/// Both id counters and both tables live here so every mutation is
/// serialized against every lookup.
#[derive(Debug)]
struct Inner {
    entries: HashMap<i64, WaitlistEntry>,
    email_index: HashMap<String, i64>,
    users: HashMap<i64, User>,
    next_entry_id: i64,
    next_user_id: i64,
}

/// Mutex-guarded, non-durable [`WaitlistStore`].
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                email_index: HashMap::new(),
                users: HashMap::new(),
                next_entry_id: 1,
                next_user_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WaitlistStore for MemoryStore {
    async fn create_entry(&self, entry: NewWaitlistEntry) -> Result<WaitlistEntry, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.email_index.contains_key(&entry.email) {
            return Err(StoreError::DuplicateEmail(entry.email));
        }

        let id = inner.next_entry_id;
        inner.next_entry_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Backend("entry id space exhausted".to_string()))?;

        let stored = entry.into_entry(id, Utc::now());
        inner.email_index.insert(stored.email.clone(), id);
        inner.entries.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_entry_by_email(&self, email: &str) -> Result<Option<WaitlistEntry>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .email_index
            .get(email)
            .and_then(|id| inner.entries.get(id))
            .cloned())
    }

    async fn count_entries(&self) -> Result<u64, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.entries.len() as u64)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername(user.username));
        }

        let id = inner.next_user_id;
        inner.next_user_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Backend("user id space exhausted".to_string()))?;

        let stored = user.into_user(id);
        inner.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let Ok(a) = store.create_entry(NewWaitlistEntry::new("a@example.com")).await else {
            panic!("first insert failed");
        };
        let Ok(b) = store.create_entry(NewWaitlistEntry::new("b@example.com")).await else {
            panic!("second insert failed");
        };
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.source, "landing");
        assert!(b.created_at >= a.created_at);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        let _ = store.create_entry(NewWaitlistEntry::new("a@example.com")).await;
        let result = store.create_entry(NewWaitlistEntry::new("a@example.com")).await;
        assert_eq!(
            result,
            Err(StoreError::DuplicateEmail("a@example.com".to_string()))
        );
        assert_eq!(store.count_entries().await, Ok(1));
    }

    #[tokio::test]
    async fn email_match_is_case_sensitive() {
        let store = MemoryStore::new();
        let _ = store.create_entry(NewWaitlistEntry::new("a@example.com")).await;
        let result = store.create_entry(NewWaitlistEntry::new("A@example.com")).await;
        assert!(result.is_ok());
        assert_eq!(store.count_entries().await, Ok(2));
    }

    #[tokio::test]
    async fn duplicate_does_not_consume_an_id() {
        let store = MemoryStore::new();
        let _ = store.create_entry(NewWaitlistEntry::new("a@example.com")).await;
        let _ = store.create_entry(NewWaitlistEntry::new("a@example.com")).await;
        let Ok(b) = store.create_entry(NewWaitlistEntry::new("b@example.com")).await else {
            panic!("insert failed");
        };
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn lookup_by_email() {
        let store = MemoryStore::new();
        let _ = store
            .create_entry(NewWaitlistEntry::new("a@example.com").with_name("Ada"))
            .await;

        let Ok(Some(found)) = store.get_entry_by_email("a@example.com").await else {
            panic!("entry not found");
        };
        assert_eq!(found.name.as_deref(), Some("Ada"));

        let missing = store.get_entry_by_email("nobody@example.com").await;
        assert_eq!(missing, Ok(None));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_same_email_creates_once() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .create_entry(NewWaitlistEntry::new("race@example.com"))
                    .await
            }));
        }

        let mut created = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await {
                Ok(Ok(_)) => created += 1,
                Ok(Err(StoreError::DuplicateEmail(_))) => duplicates += 1,
                other => panic!("unexpected outcome: {other:?}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(duplicates, 31);
        assert_eq!(store.count_entries().await, Ok(1));
    }

    #[tokio::test]
    async fn users_round_trip() {
        let store = MemoryStore::new();
        let Ok(user) = store.create_user(NewUser::new("ada", "secret")).await else {
            panic!("user insert failed");
        };
        assert_eq!(user.id, 1);

        let by_id = store.get_user(user.id).await;
        assert_eq!(by_id, Ok(Some(user.clone())));

        let by_name = store.get_user_by_username("ada").await;
        assert_eq!(by_name, Ok(Some(user)));

        assert_eq!(store.get_user(99).await, Ok(None));
        assert_eq!(store.get_user_by_username("bob").await, Ok(None));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        let _ = store.create_user(NewUser::new("ada", "a")).await;
        let result = store.create_user(NewUser::new("ada", "b")).await;
        assert_eq!(
            result,
            Err(StoreError::DuplicateUsername("ada".to_string()))
        );
    }
}
