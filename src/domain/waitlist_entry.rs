//! Waitlist entry aggregate and its insertion payload.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Provenance tag applied when a registration does not name one.
pub const DEFAULT_SOURCE: &str = "landing";

/// One waitlist registration record.
///
/// Created exactly once by a [`super::WaitlistStore`] and never mutated
/// afterwards. `id` is assigned by the store and is strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    /// Store-assigned surrogate key, never reused.
    pub id: i64,
    /// Email address, unique across all entries (exact, case-sensitive).
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Optional free-text message.
    pub message: Option<String>,
    /// Provenance tag (e.g. `"landing"`, `"waitlist"`).
    pub source: String,
    /// Insertion timestamp.
    pub created_at: DateTime<Utc>,
}

/// Payload accepted by [`super::WaitlistStore::create_entry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewWaitlistEntry {
    /// Email address to register.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Optional free-text message.
    pub message: Option<String>,
    /// Optional provenance tag; defaults to [`DEFAULT_SOURCE`].
    pub source: Option<String>,
}

impl NewWaitlistEntry {
    /// Creates a payload carrying only an email address.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the free-text message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the provenance tag.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Source to persist: the given tag, or [`DEFAULT_SOURCE`] when it is
    /// absent or empty.
    #[must_use]
    pub fn resolved_source(&self) -> &str {
        self.source
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SOURCE)
    }

    /// Message to persist. Empty strings are stored as `None`.
    #[must_use]
    pub fn resolved_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    /// Name to persist. Empty strings are stored as `None`.
    #[must_use]
    pub fn resolved_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Materializes the stored record with the store-assigned id and
    /// insertion timestamp.
    #[must_use]
    pub fn into_entry(self, id: i64, created_at: DateTime<Utc>) -> WaitlistEntry {
        let source = self.resolved_source().to_string();
        let message = self.resolved_message().map(str::to_string);
        let name = self.resolved_name().map(str::to_string);
        WaitlistEntry {
            id,
            email: self.email,
            name,
            message,
            source,
            created_at,
        }
    }
}
