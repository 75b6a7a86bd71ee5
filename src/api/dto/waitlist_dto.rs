//! Waitlist DTOs for registration and stats.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::{RegisterInput, Registration, WaitlistStats};

/// Request body for `POST /api/waitlist`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct JoinWaitlistRequest {
    /// Email address to register.
    pub email: String,
    /// Provenance tag. Defaults to `"landing"`.
    #[serde(default)]
    pub source: Option<String>,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Optional free-text message.
    #[serde(default)]
    pub message: Option<String>,
}

impl From<JoinWaitlistRequest> for RegisterInput {
    fn from(req: JoinWaitlistRequest) -> Self {
        Self {
            email: req.email,
            name: req.name,
            message: req.message,
            source: req.source,
        }
    }
}

/// Response body for `POST /api/waitlist` (201 Created).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinWaitlistResponse {
    /// Confirmation message.
    pub message: String,
    /// 1-based position: total signups including this one.
    pub position: u64,
    /// Founders' spots left after this signup.
    pub founders_spot_remaining: u64,
}

impl JoinWaitlistResponse {
    /// Builds the response for a successful registration.
    #[must_use]
    pub fn new(message: &str, registration: &Registration) -> Self {
        Self {
            message: message.to_string(),
            position: registration.position,
            founders_spot_remaining: registration.founders_spot_remaining,
        }
    }
}

/// Response body for `GET /api/waitlist/stats`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistStatsResponse {
    /// Total number of signups.
    pub total_signups: u64,
    /// Founders' spots left.
    pub founders_spot_remaining: u64,
}

impl From<WaitlistStats> for WaitlistStatsResponse {
    fn from(stats: WaitlistStats) -> Self {
        Self {
            total_signups: stats.total_signups,
            founders_spot_remaining: stats.founders_spot_remaining,
        }
    }
}
