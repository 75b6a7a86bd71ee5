//! # foundry-waitlist
//!
//! Waitlist registration and signup statistics for the product landing
//! page.
//!
//! Accepts an email (plus optional name, message, and source), enforces
//! email uniqueness, persists the entry, and reports aggregate counts
//! including the number of founders' spots left. The landing page itself
//! is a separate client that talks to this service over HTTP.
//!
//! ## Architecture
//!
//! ```text
//! Landing page (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── WaitlistService (service/)
//!     │
//!     ├── WaitlistStore trait (domain/)
//!     │     ├── MemoryStore
//!     │     └── PostgresStore (persistence/)
//!     │
//!     └── PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod telemetry;
