//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase on the wire to match the landing page
//! client.

pub mod waitlist_dto;

pub use waitlist_dto::*;
