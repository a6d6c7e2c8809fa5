//! Status handler - redacted configuration snapshot.

use axum::Json;
use axum::extract::State;
use tracing::debug;

use crate::dto::StatusResponse;
use crate::state::AppState;

/// Report that the relay is running, with its (secret-free) configuration.
/// GET /api/status
pub async fn get(State(state): State<AppState>) -> Json<StatusResponse> {
    debug!("GET /api/status");
    Json(StatusResponse::running(&state.config))
}
