//! Waitlist service: validates registrations and derives signup stats.

use std::sync::Arc;

use validator::ValidateEmail;

use crate::domain::{NewWaitlistEntry, WaitlistEntry, WaitlistStore};
use crate::error::{Operation, WaitlistError};

/// Validated-or-not registration request as received from a caller.
///
/// Only `email` is required. `name` and `message` are optional at this
/// boundary; stricter rules belong to the form that collects them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterInput {
    /// Email address to register.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Optional free-text message.
    pub message: Option<String>,
    /// Optional provenance tag.
    pub source: Option<String>,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// The stored entry.
    pub entry: WaitlistEntry,
    /// Total entry count observed right after the insert (1-based).
    pub position: u64,
    /// `founders_spots - position`, floored at 0.
    pub founders_spot_remaining: u64,
}

/// Aggregate signup statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitlistStats {
    /// Number of entries stored.
    pub total_signups: u64,
    /// `founders_spots - total_signups`, floored at 0.
    pub founders_spot_remaining: u64,
}

/// Registration and stats coordinator.
///
/// Holds no entry state of its own; every call goes to the injected
/// [`WaitlistStore`].
#[derive(Debug, Clone)]
pub struct WaitlistService {
    store: Arc<dyn WaitlistStore>,
    founders_spots: u64,
}

impl WaitlistService {
    /// Creates a new `WaitlistService`.
    #[must_use]
    pub fn new(store: Arc<dyn WaitlistStore>, founders_spots: u64) -> Self {
        Self {
            store,
            founders_spots,
        }
    }

    /// Returns a reference to the inner store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn WaitlistStore> {
        &self.store
    }

    /// Registers an email on the waitlist.
    ///
    /// # Errors
    ///
    /// - [`WaitlistError::InvalidEmail`] if `email` is not a valid address.
    /// - [`WaitlistError::AlreadyRegistered`] if the email is present,
    ///   including when a concurrent registration wins the insert.
    /// - [`WaitlistError::Storage`] on any other store failure.
    pub async fn register(&self, input: RegisterInput) -> Result<Registration, WaitlistError> {
        if !is_valid_email(&input.email) {
            return Err(WaitlistError::InvalidEmail(input.email));
        }

        let existing = self
            .store
            .get_entry_by_email(&input.email)
            .await
            .map_err(|e| WaitlistError::from_store(Operation::Register, e))?;
        if existing.is_some() {
            tracing::debug!(email = %input.email, "email already on waitlist");
            return Err(WaitlistError::AlreadyRegistered(input.email));
        }

        let new_entry = NewWaitlistEntry {
            email: input.email,
            name: input.name,
            message: input.message,
            source: input.source,
        };
        let entry = self
            .store
            .create_entry(new_entry)
            .await
            .map_err(|e| WaitlistError::from_store(Operation::Register, e))?;

        let position = self
            .store
            .count_entries()
            .await
            .map_err(|e| WaitlistError::from_store(Operation::Register, e))?;

        tracing::info!(id = entry.id, position, source = %entry.source, "waitlist entry created");
        Ok(Registration {
            entry,
            position,
            founders_spot_remaining: self.founders_spot_remaining(position),
        })
    }

    /// Returns the current signup totals.
    ///
    /// # Errors
    ///
    /// Returns [`WaitlistError::Storage`] if the store cannot be read.
    pub async fn stats(&self) -> Result<WaitlistStats, WaitlistError> {
        let total_signups = self
            .store
            .count_entries()
            .await
            .map_err(|e| WaitlistError::from_store(Operation::Stats, e))?;
        Ok(WaitlistStats {
            total_signups,
            founders_spot_remaining: self.founders_spot_remaining(total_signups),
        })
    }

    /// `founders_spots - count`, floored at 0.
    #[must_use]
    pub const fn founders_spot_remaining(&self, count: u64) -> u64 {
        self.founders_spots.saturating_sub(count)
    }
}

/// Syntactic email check. The value is checked as given, with no trimming.
///
/// On top of [`ValidateEmail`], the local part may not start, end, or
/// contain a run of dots, and the domain must be a dotted host name whose
/// last label is at least two ASCII letters. IP literals are rejected.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || !email.validate_email() {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    !local.starts_with('.') && !local.ends_with('.') && !local.contains("..")
}

fn is_valid_domain(domain: &str) -> bool {
    if domain.starts_with('[') {
        return false;
    }
    let Some((_, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::{MemoryStore, NewUser, StoreError, User};

    fn make_service() -> WaitlistService {
        WaitlistService::new(Arc::new(MemoryStore::new()), 1000)
    }

    fn input(email: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            ..RegisterInput::default()
        }
    }

    /// Store whose every call fails, for exercising the 500 path.
    #[derive(Debug)]
    struct BrokenStore;

    #[async_trait]
    impl WaitlistStore for BrokenStore {
        async fn create_entry(&self, _: NewWaitlistEntry) -> Result<WaitlistEntry, StoreError> {
            Err(StoreError::Backend("disk on fire".to_string()))
        }
        async fn get_entry_by_email(&self, _: &str) -> Result<Option<WaitlistEntry>, StoreError> {
            Err(StoreError::Backend("disk on fire".to_string()))
        }
        async fn count_entries(&self) -> Result<u64, StoreError> {
            Err(StoreError::Backend("disk on fire".to_string()))
        }
        async fn create_user(&self, _: NewUser) -> Result<User, StoreError> {
            Err(StoreError::Backend("disk on fire".to_string()))
        }
        async fn get_user(&self, _: i64) -> Result<Option<User>, StoreError> {
            Err(StoreError::Backend("disk on fire".to_string()))
        }
        async fn get_user_by_username(&self, _: &str) -> Result<Option<User>, StoreError> {
            Err(StoreError::Backend("disk on fire".to_string()))
        }
    }

    /// Store that hides existing entries from lookups, so the insert is
    /// the only place a duplicate is caught.
    #[derive(Debug, Default)]
    struct LookupBlindStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl WaitlistStore for LookupBlindStore {
        async fn create_entry(&self, e: NewWaitlistEntry) -> Result<WaitlistEntry, StoreError> {
            self.inner.create_entry(e).await
        }
        async fn get_entry_by_email(&self, _: &str) -> Result<Option<WaitlistEntry>, StoreError> {
            Ok(None)
        }
        async fn count_entries(&self) -> Result<u64, StoreError> {
            self.inner.count_entries().await
        }
        async fn create_user(&self, u: NewUser) -> Result<User, StoreError> {
            self.inner.create_user(u).await
        }
        async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError> {
            self.inner.get_user(id).await
        }
        async fn get_user_by_username(&self, name: &str) -> Result<Option<User>, StoreError> {
            self.inner.get_user_by_username(name).await
        }
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@example.com"));
        assert!(is_valid_email("user+tag@example.org"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@nodomain.com"));
        assert!(!is_valid_email(" a@example.com"));
    }

    #[test]
    fn email_validation_rejects_malformed_parts() {
        assert!(is_valid_email("first.last@mail.example.co.uk"));
        assert!(!is_valid_email("a..b@example.com"));
        assert!(!is_valid_email(".a@example.com"));
        assert!(!is_valid_email("a.@example.com"));
        assert!(!is_valid_email("a@example"));
        assert!(!is_valid_email("a@example.c"));
        assert!(!is_valid_email("a@example.c0m"));
        assert!(!is_valid_email("a@[127.0.0.1]"));
        assert!(!is_valid_email("a@127.0.0.1"));
    }

    #[tokio::test]
    async fn register_reports_position_and_remaining() {
        let service = make_service();

        let Ok(first) = service.register(input("a@example.com")).await else {
            panic!("first registration failed");
        };
        assert_eq!(first.position, 1);
        assert_eq!(first.founders_spot_remaining, 999);

        let second = service.register(input("a@example.com")).await;
        assert!(matches!(second, Err(WaitlistError::AlreadyRegistered(_))));

        let Ok(third) = service.register(input("b@example.com")).await else {
            panic!("third registration failed");
        };
        assert_eq!(third.position, 2);
        assert_eq!(third.founders_spot_remaining, 998);

        let Ok(stats) = service.stats().await else {
            panic!("stats failed");
        };
        assert_eq!(stats.total_signups, 2);
        assert_eq!(stats.founders_spot_remaining, 998);
    }

    #[tokio::test]
    async fn invalid_email_does_not_touch_store() {
        let service = make_service();
        let result = service.register(input("not-an-email")).await;
        assert!(matches!(result, Err(WaitlistError::InvalidEmail(_))));
        assert_eq!(service.store().count_entries().await, Ok(0));
    }

    #[tokio::test]
    async fn duplicate_leaves_count_unchanged() {
        let service = make_service();
        let _ = service.register(input("a@example.com")).await;
        let _ = service.register(input("a@example.com")).await;
        assert_eq!(service.store().count_entries().await, Ok(1));
    }

    #[tokio::test]
    async fn optional_fields_are_stored() {
        let service = make_service();
        let req = RegisterInput {
            email: "a@example.com".to_string(),
            name: Some("Ada".to_string()),
            message: Some(String::new()),
            source: Some("waitlist".to_string()),
        };
        let Ok(reg) = service.register(req).await else {
            panic!("registration failed");
        };
        assert_eq!(reg.entry.name.as_deref(), Some("Ada"));
        assert_eq!(reg.entry.message, None);
        assert_eq!(reg.entry.source, "waitlist");
    }

    #[tokio::test]
    async fn insert_time_duplicate_is_a_conflict() {
        let service = WaitlistService::new(Arc::new(LookupBlindStore::default()), 1000);
        let _ = service.register(input("a@example.com")).await;
        let result = service.register(input("a@example.com")).await;
        assert!(matches!(result, Err(WaitlistError::AlreadyRegistered(_))));
    }

    #[tokio::test]
    async fn store_failure_is_storage_error() {
        let service = WaitlistService::new(Arc::new(BrokenStore), 1000);
        let reg = service.register(input("a@example.com")).await;
        assert!(matches!(
            reg,
            Err(WaitlistError::Storage {
                operation: Operation::Register,
                ..
            })
        ));
        let stats = service.stats().await;
        assert!(matches!(
            stats,
            Err(WaitlistError::Storage {
                operation: Operation::Stats,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn remaining_floors_at_zero() {
        let service = WaitlistService::new(Arc::new(MemoryStore::new()), 2);
        for email in ["a@example.com", "b@example.com", "c@example.com"] {
            let _ = service.register(input(email)).await;
        }
        let Ok(stats) = service.stats().await else {
            panic!("stats failed");
        };
        assert_eq!(stats.total_signups, 3);
        assert_eq!(stats.founders_spot_remaining, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_of_same_email() {
        let service = make_service();
        let a = {
            let service = service.clone();
            tokio::spawn(async move { service.register(input("race@example.com")).await })
        };
        let b = {
            let service = service.clone();
            tokio::spawn(async move { service.register(input("race@example.com")).await })
        };

        let (Ok(a), Ok(b)) = (a.await, b.await) else {
            panic!("task panicked");
        };
        let created = [&a, &b].iter().filter(|r| r.is_ok()).count();
        let conflicts = [&a, &b]
            .iter()
            .filter(|r| matches!(r, Err(WaitlistError::AlreadyRegistered(_))))
            .count();
        assert_eq!(created, 1);
        assert_eq!(conflicts, 1);
        assert_eq!(service.store().count_entries().await, Ok(1));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn count_matches_distinct_successes() {
        let service = make_service();
        let mut handles = Vec::new();
        for i in 0..50 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.register(input(&format!("user{}@example.com", i % 20))).await
            }));
        }
        let mut created = 0u64;
        for handle in handles {
            if let Ok(Ok(_)) = handle.await {
                created += 1;
            }
        }
        assert_eq!(created, 20);
        assert_eq!(service.store().count_entries().await, Ok(20));
    }
}
