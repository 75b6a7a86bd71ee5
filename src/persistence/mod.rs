//! Persistence layer: PostgreSQL-backed waitlist store.
//!
//! Provides [`PostgresStore`], a [`crate::domain::WaitlistStore`] over
//! `sqlx::PgPool`. Email and username uniqueness are enforced by table
//! constraints; the schema lives in `migrations/`.

pub mod models;
pub mod postgres;

pub use postgres::PostgresStore;
