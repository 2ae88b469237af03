//! Name search handler.

use axum::Json;
use axum::extract::{Query, State};
use serde_json::{Value, json};

use crate::dto::request::SearchQuery;
use crate::error::ApiError;
use crate::extractors::Actor;
use crate::state::AppState;

/// GET /api/search?q=...
pub async fn search(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let results = state.file_service.search(&ctx, &query.q).await?;
    Ok(Json(json!({ "success": true, "data": results })))
}
