//! Account record kept alongside the waitlist for future sign-in support.

use std::fmt;

/// A registered account.
///
/// `password` is an opaque credential blob; this crate never interprets it.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned surrogate key.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Opaque credential.
    pub password: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Payload accepted by [`super::WaitlistStore::create_user`].
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique login name.
    pub username: String,
    /// Opaque credential.
    pub password: String,
}

impl NewUser {
    /// Creates a new user payload.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Materializes the stored record with the store-assigned id.
    #[must_use]
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}
