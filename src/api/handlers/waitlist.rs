//! Waitlist handlers: join and stats.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{JoinWaitlistRequest, JoinWaitlistResponse, WaitlistStatsResponse};
use crate::app_state::AppState;
use crate::error::{JOINED_MESSAGE, MessageResponse, WaitlistError};

/// `POST /api/waitlist` — Join the waitlist.
///
/// A body that is not valid JSON for [`JoinWaitlistRequest`] (including
/// a missing `email`) is answered like an invalid email.
///
/// # Errors
///
/// Returns [`WaitlistError`] on invalid input, duplicate email, or
/// storage failure.
#[utoipa::path(
    post,
    path = "/api/waitlist",
    tag = "Waitlist",
    summary = "Join the waitlist",
    description = "Registers an email. The response carries the caller's position and the number of founders' spots still available.",
    request_body = JoinWaitlistRequest,
    responses(
        (status = 201, description = "Joined the waitlist", body = JoinWaitlistResponse),
        (status = 400, description = "Invalid email address", body = MessageResponse),
        (status = 409, description = "Email already registered", body = MessageResponse),
        (status = 500, description = "Internal failure", body = MessageResponse),
    )
)]
pub async fn join_waitlist(
    State(state): State<AppState>,
    body: Result<Json<JoinWaitlistRequest>, JsonRejection>,
) -> Result<impl IntoResponse, WaitlistError> {
    let Json(req) = body.map_err(|rejection| WaitlistError::InvalidEmail(rejection.body_text()))?;

    let registration = state.waitlist_service.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(JoinWaitlistResponse::new(JOINED_MESSAGE, &registration)),
    ))
}

/// `GET /api/waitlist/stats` — Signup totals.
///
/// # Errors
///
/// Returns [`WaitlistError::Storage`] if the store cannot be read.
#[utoipa::path(
    get,
    path = "/api/waitlist/stats",
    tag = "Waitlist",
    summary = "Waitlist stats",
    description = "Returns the total number of signups and the founders' spots remaining.",
    responses(
        (status = 200, description = "Current totals", body = WaitlistStatsResponse),
        (status = 500, description = "Internal failure", body = MessageResponse),
    )
)]
pub async fn waitlist_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, WaitlistError> {
    let stats = state.waitlist_service.stats().await?;
    Ok(Json(WaitlistStatsResponse::from(stats)))
}

/// Waitlist routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/waitlist", post(join_waitlist))
        .route("/waitlist/stats", get(waitlist_stats))
}
