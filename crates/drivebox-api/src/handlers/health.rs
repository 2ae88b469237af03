//! Health check handler.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let storage_healthy = state.blob_store.health_check().await.unwrap_or(false);

    Ok(Json(json!({
        "success": true,
        "data": {
            "status": if storage_healthy { "ok" } else { "degraded" },
            "storage_provider": state.blob_store.provider_type(),
        }
    })))
}
