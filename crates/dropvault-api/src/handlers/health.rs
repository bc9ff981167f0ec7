//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ComponentHealth, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let node_store = ComponentHealth {
        name: state.node_store.backend().to_string(),
        healthy: state.node_store.health_check().await.unwrap_or(false),
    };
    let blob_store = ComponentHealth {
        name: state.blob_store.provider_type().to_string(),
        healthy: state.blob_store.health_check().await.unwrap_or(false),
    };

    let status = if node_store.healthy && blob_store.healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        node_store,
        blob_store,
    })
}
