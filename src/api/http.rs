//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use super::rest::{admin, checkin, export, players};
use super::state::AppState;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.allowed_origins);

    Router::new()
        // Health check
        .route("/", get(root))
        // Participants and RSVP
        .route("/players", get(players::list_players))
        .route("/players/rsvp", post(players::rsvp_player))
        .route(
            "/players/:id",
            get(players::get_player).delete(admin::delete_player),
        )
        .route("/players/:id/pay", put(players::mark_player_paid))
        // Check-in
        .route("/players/:id/checkin", put(checkin::check_in_player))
        .route("/players/:id/undo-checkin", put(checkin::undo_check_in))
        .route("/checkin/stats", get(checkin::get_checkin_stats))
        // Export and admin
        .route("/export/csv", get(export::export_csv))
        .route("/admin/reset", post(admin::reset_all_data))
        .layer(cors)
        .with_state(state)
}

/// Any origin when none are configured, otherwise the configured list
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(parsed))
}

async fn root() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "RSVP roster is running!"
    }))
}
