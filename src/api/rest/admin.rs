//! Admin endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use super::{run_blocking, ApiResult, MessageResponse};
use crate::api::state::AppState;

/// DELETE /players/:id - Remove a participant completely
pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Path(id) = path?;
    let deletion =
        run_blocking(&state.roster, move |roster| roster.delete_participant(id)).await?;
    Ok(Json(MessageResponse::new(deletion.message, None)))
}

/// POST /admin/reset - Remove every participant
pub async fn reset_all_data(State(state): State<Arc<AppState>>) -> ApiResult<MessageResponse> {
    let reset = run_blocking(&state.roster, |roster| roster.reset_all()).await?;
    Ok(Json(MessageResponse::new(reset.message, None)))
}
