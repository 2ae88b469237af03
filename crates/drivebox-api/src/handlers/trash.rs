//! Trash emptying handler.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::extractors::Actor;
use crate::state::AppState;

/// DELETE /api/trash
pub async fn empty_trash(
    State(state): State<AppState>,
    Actor(ctx): Actor,
) -> Result<Json<Value>, ApiError> {
    let report = state.lifecycle.empty_trash(ctx.user_id).await?;
    Ok(Json(json!({ "success": true, "data": report })))
}
