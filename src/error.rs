//! Waitlist error types with HTTP status code mapping.
//!
//! [`WaitlistError`] is the single translation point from store outcomes
//! to HTTP responses. Every variant maps to a status code and a fixed,
//! user-facing message; storage details never reach the response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::StoreError;

/// Message returned on a successful registration.
pub const JOINED_MESSAGE: &str = "Successfully joined the waitlist!";

/// Message returned for a malformed email.
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address. Please enter a valid email.";

/// Message returned when the email is already on the waitlist.
pub const ALREADY_REGISTERED_MESSAGE: &str =
    "You're already on our waitlist! We'll be in touch soon.";

/// Message returned when a registration fails server-side.
pub const REGISTER_FAILED_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Message returned when the stats lookup fails server-side.
pub const STATS_FAILED_MESSAGE: &str = "Failed to fetch stats";

/// JSON body shared by every non-2xx response.
///
/// ```json
/// { "message": "Invalid email address. Please enter a valid email." }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// Which operation a storage failure interrupted. Selects the 500 message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /api/waitlist`.
    Register,
    /// `GET /api/waitlist/stats`.
    Stats,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant             | HTTP Status               |
/// |---------------------|---------------------------|
/// | `InvalidEmail`      | 400 Bad Request           |
/// | `AlreadyRegistered` | 409 Conflict              |
/// | `Storage`           | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum WaitlistError {
    /// Request body missing a syntactically valid email.
    #[error("invalid email: {0}")]
    InvalidEmail(String),

    /// Email is already registered.
    #[error("already registered: {0}")]
    AlreadyRegistered(String),

    /// Unexpected store failure. The string is logged, never returned.
    #[error("storage error during {operation:?}: {detail}")]
    Storage {
        /// Operation that was interrupted.
        operation: Operation,
        /// Backend error detail.
        detail: String,
    },
}

impl WaitlistError {
    /// Maps a store outcome raised during `operation` to a service error.
    #[must_use]
    pub fn from_store(operation: Operation, err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => Self::AlreadyRegistered(email),
            other => Self::Storage {
                operation,
                detail: other.to_string(),
            },
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            Self::AlreadyRegistered(_) => StatusCode::CONFLICT,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the user-facing message for this variant.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidEmail(_) => INVALID_EMAIL_MESSAGE,
            Self::AlreadyRegistered(_) => ALREADY_REGISTERED_MESSAGE,
            Self::Storage {
                operation: Operation::Register,
                ..
            } => REGISTER_FAILED_MESSAGE,
            Self::Storage {
                operation: Operation::Stats,
                ..
            } => STATS_FAILED_MESSAGE,
        }
    }
}

impl IntoResponse for WaitlistError {
    fn into_response(self) -> Response {
        if let Self::Storage { operation, detail } = &self {
            tracing::error!(?operation, %detail, "waitlist storage failure");
        }
        let status = self.status_code();
        let body = MessageResponse {
            message: self.public_message().to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}
