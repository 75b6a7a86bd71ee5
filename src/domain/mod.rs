//! Domain layer: waitlist records, users, and the storage abstraction.
//!
//! This module contains the entry and user models, the [`WaitlistStore`]
//! trait every backend implements, and the in-process [`MemoryStore`].

pub mod memory_store;
pub mod store;
pub mod user;
pub mod waitlist_entry;

pub use memory_store::MemoryStore;
pub use store::{StoreError, WaitlistStore};
pub use user::{NewUser, User};
pub use waitlist_entry::{DEFAULT_SOURCE, NewWaitlistEntry, WaitlistEntry};
