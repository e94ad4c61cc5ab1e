//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::api::dto::HealthResponse;
use crate::state::AppState;

/// GET /health - liveness probe with application identity
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.application.name.clone(),
        state.application.version.clone(),
    ))
}
