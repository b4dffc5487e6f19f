//! Participant endpoints

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use super::{run_blocking, ApiResult, MessageResponse};
use crate::api::state::AppState;
use crate::types::{AttendanceStatus, CategorizedRoster, Participant, ParticipantView};

/// Body of `POST /players/rsvp`
#[derive(Debug, Deserialize)]
pub struct RsvpRequest {
    pub name: String,
    pub status: AttendanceStatus,
}

/// Body of `PUT /players/:id/pay`
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub paid: bool,
}

/// Response for GET /players
#[derive(Debug, Serialize)]
pub struct PlayerListResponse {
    pub confirmed: Vec<ParticipantView>,
    pub waitlist: Vec<ParticipantView>,
    pub out: Vec<ParticipantView>,
    pub total_confirmed: usize,
    pub total_waitlist: usize,
    pub spots_available: usize,
}

impl From<CategorizedRoster> for PlayerListResponse {
    fn from(roster: CategorizedRoster) -> Self {
        let views = |list: Vec<Participant>| -> Vec<ParticipantView> {
            list.into_iter().map(ParticipantView::from).collect()
        };
        Self {
            confirmed: views(roster.confirmed),
            waitlist: views(roster.waitlist),
            out: views(roster.out),
            total_confirmed: roster.total_confirmed,
            total_waitlist: roster.total_waitlist,
            spots_available: roster.spots_available,
        }
    }
}

/// GET /players - Confirmed, waitlisted and OUT participants
pub async fn list_players(State(state): State<Arc<AppState>>) -> Json<PlayerListResponse> {
    Json(state.roster.list_categorized().into())
}

/// GET /players/:id - Single participant
pub async fn get_player(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<ParticipantView> {
    let Path(id) = path?;
    let participant = state.roster.get_participant(id)?;
    Ok(Json(participant.into()))
}

/// POST /players/rsvp - RSVP IN or OUT by name
pub async fn rsvp_player(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RsvpRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(request) = body?;
    let outcome = run_blocking(&state.roster, move |roster| {
        roster.rsvp(&request.name, request.status)
    })
    .await?;
    Ok(Json(MessageResponse::new(outcome.message, Some(outcome.participant))))
}

/// PUT /players/:id/pay - Mark paid or unpaid
pub async fn mark_player_paid(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<PaymentRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Path(id) = path?;
    let Json(request) = body?;
    let outcome = run_blocking(&state.roster, move |roster| {
        roster.set_payment(id, request.paid)
    })
    .await?;
    Ok(Json(MessageResponse::new(outcome.message, Some(outcome.participant))))
}
