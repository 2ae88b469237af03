//! Handlers for operations that apply to files and folders alike:
//! listing, trash, restore, permanent delete, move, and rename.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::{Value, json};
use uuid::Uuid;

use drivebox_core::types::{FileId, FolderId};
use drivebox_entity::resource::ResourceType;

use crate::dto::request::{ListQuery, MoveRequest, RenameRequest};
use crate::error::ApiError;
use crate::extractors::Actor;
use crate::handlers::validate_dto;
use crate::state::AppState;

/// GET /api/resources?folder_id=...&filter=...
pub async fn list_resources(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let listing = state
        .file_service
        .list_resources(&ctx, query.folder_id, query.filter)
        .await?;

    Ok(Json(json!({ "success": true, "data": listing })))
}

/// POST /api/resources/{type}/{id}/trash
pub async fn soft_delete(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Path((resource_type, id)): Path<(ResourceType, Uuid)>,
) -> Result<Json<Value>, ApiError> {
    state.lifecycle.soft_delete(resource_type, id, &ctx).await?;
    Ok(Json(
        json!({ "success": true, "data": { "message": "Moved to trash" } }),
    ))
}

/// POST /api/resources/{type}/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Path((resource_type, id)): Path<(ResourceType, Uuid)>,
) -> Result<Json<Value>, ApiError> {
    state.lifecycle.restore(resource_type, id, &ctx).await?;
    Ok(Json(
        json!({ "success": true, "data": { "message": "Restored" } }),
    ))
}

/// DELETE /api/resources/{type}/{id}
pub async fn permanent_delete(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Path((resource_type, id)): Path<(ResourceType, Uuid)>,
) -> Result<Json<Value>, ApiError> {
    let report = state
        .lifecycle
        .permanent_delete(resource_type, id, &ctx)
        .await?;
    Ok(Json(json!({ "success": true, "data": report })))
}

/// PUT /api/resources/{type}/{id}/move
pub async fn move_resource(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Path((resource_type, id)): Path<(ResourceType, Uuid)>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<Value>, ApiError> {
    let data = match resource_type {
        ResourceType::File => {
            let file = state
                .file_service
                .move_file(&ctx, FileId::from_uuid(id), req.destination_folder_id)
                .await?;
            json!(file)
        }
        ResourceType::Folder => {
            let folder = state
                .folder_service
                .move_folder(&ctx, FolderId::from_uuid(id), req.destination_folder_id)
                .await?;
            json!(folder)
        }
    };

    Ok(Json(json!({ "success": true, "data": data })))
}

/// PUT /api/resources/{type}/{id}/rename
pub async fn rename_resource(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Path((resource_type, id)): Path<(ResourceType, Uuid)>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<Value>, ApiError> {
    validate_dto(&req)?;

    let data = match resource_type {
        ResourceType::File => {
            let file = state
                .file_service
                .rename_file(&ctx, FileId::from_uuid(id), &req.new_name)
                .await?;
            json!(file)
        }
        ResourceType::Folder => {
            let folder = state
                .folder_service
                .rename_folder(&ctx, FolderId::from_uuid(id), &req.new_name)
                .await?;
            json!(folder)
        }
    };

    Ok(Json(json!({ "success": true, "data": data })))
}
