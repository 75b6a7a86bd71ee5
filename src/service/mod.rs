//! Service layer: registration and stats orchestration.
//!
//! [`WaitlistService`] validates requests, delegates to the injected
//! [`crate::domain::WaitlistStore`], and derives positions and founders'
//! spot counts.

pub mod waitlist_service;

pub use waitlist_service::{
    RegisterInput, Registration, WaitlistService, WaitlistStats, is_valid_email,
};
