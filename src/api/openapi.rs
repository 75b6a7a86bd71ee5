//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::dto::{JoinWaitlistRequest, JoinWaitlistResponse, WaitlistStatsResponse};
use crate::api::handlers::{system, waitlist};
use crate::error::MessageResponse;

/// Generated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "foundry-waitlist",
        description = "Waitlist registration and signup statistics"
    ),
    paths(
        waitlist::join_waitlist,
        waitlist::waitlist_stats,
        system::health_handler,
    ),
    components(schemas(
        JoinWaitlistRequest,
        JoinWaitlistResponse,
        WaitlistStatsResponse,
        MessageResponse,
        system::HealthResponse,
    )),
    tags(
        (name = "Waitlist", description = "Signup and stats"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;
