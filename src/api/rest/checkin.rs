//! Check-in endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use super::{run_blocking, ApiResult, MessageResponse};
use crate::api::state::AppState;
use crate::types::CheckInStats;

/// PUT /players/:id/checkin
pub async fn check_in_player(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Path(id) = path?;
    let outcome = run_blocking(&state.roster, move |roster| roster.check_in(id)).await?;
    Ok(Json(MessageResponse::new(outcome.message, Some(outcome.participant))))
}

/// PUT /players/:id/undo-checkin
pub async fn undo_check_in(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Path(id) = path?;
    let outcome = run_blocking(&state.roster, move |roster| roster.undo_check_in(id)).await?;
    Ok(Json(MessageResponse::new(outcome.message, Some(outcome.participant))))
}

/// GET /checkin/stats
pub async fn get_checkin_stats(State(state): State<Arc<AppState>>) -> Json<CheckInStats> {
    Json(state.roster.stats())
}
