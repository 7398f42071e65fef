//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = matches!(state.db_pool.health_check().await, Ok(true));
    let storage = matches!(state.storage.health_check().await, Ok(true));

    let label = |ok: bool| if ok { "ok" } else { "unavailable" }.to_string();
    Json(HealthResponse {
        status: if database && storage { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: label(database),
        storage: label(storage),
    })
}
