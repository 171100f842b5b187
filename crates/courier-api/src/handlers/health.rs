//! Health check handler.

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /healthz — unauthenticated liveness check including database
/// connectivity.
pub async fn healthz(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    state.db.health_check().await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
