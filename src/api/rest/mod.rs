//! REST API module for HTTP endpoints
//!
//! - `GET /players` - Categorized roster
//! - `GET /players/:id` - Single participant
//! - `POST /players/rsvp` - RSVP IN or OUT
//! - `PUT /players/:id/pay` - Payment flag
//! - `PUT /players/:id/checkin`, `PUT /players/:id/undo-checkin`
//! - `GET /checkin/stats` - Check-in counters
//! - `GET /export/csv` - CSV export
//! - `DELETE /players/:id`, `POST /admin/reset` - Admin removals

pub mod admin;
pub mod checkin;
pub mod export;
pub mod players;

use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::roster::Roster;
use crate::types::{ErrorKind, Participant, ParticipantView, RosterError, RosterResult};

/// Response for operations that report a message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<ParticipantView>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>, player: Option<Participant>) -> Self {
        Self {
            success: true,
            message: message.into(),
            player: player.map(ParticipantView::from),
        }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
    pub code: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
            code: code.into(),
            status,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, ErrorKind::NotFound.as_str())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message,
            ErrorKind::Internal.as_str(),
        )
    }
}

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        let kind = err.kind();
        let status = match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidTransition => StatusCode::BAD_REQUEST,
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Storage | ErrorKind::Internal => {
                error!(error = %err, "Roster operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string(), kind.as_str())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            rejection.body_text(),
            ErrorKind::Validation.as_str(),
        )
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Run a mutating roster call off the async executor.
///
/// Commits fsync the data file while holding the roster lock.
pub async fn run_blocking<T, F>(roster: &Arc<Roster>, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Roster) -> RosterResult<T> + Send + 'static,
{
    let roster = Arc::clone(roster);
    tokio::task::spawn_blocking(move || op(&roster))
        .await
        .map_err(|e| {
            error!(error = %e, "Roster task failed to complete");
            ApiError::internal(format!("Roster task failed: {e}"))
        })?
        .map_err(ApiError::from)
}
