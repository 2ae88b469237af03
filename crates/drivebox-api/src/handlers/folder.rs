//! Folder handlers: creation, children, breadcrumbs.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::{Value, json};

use drivebox_core::types::FolderId;
use drivebox_service::folder::service::CreateFolderRequest as SvcCreateFolder;

use crate::dto::request::{ChildrenQuery, CreateFolderRequest};
use crate::error::ApiError;
use crate::extractors::Actor;
use crate::handlers::validate_dto;
use crate::state::AppState;

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<Value>, ApiError> {
    validate_dto(&req)?;

    let folder = state
        .folder_service
        .create_folder(
            &ctx,
            SvcCreateFolder {
                name: req.name,
                parent_id: req.parent_id,
            },
        )
        .await?;

    Ok(Json(json!({ "success": true, "data": folder })))
}

/// GET /api/folders?parent_id=...
pub async fn list_children(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Query(query): Query<ChildrenQuery>,
) -> Result<Json<Value>, ApiError> {
    let folders = state
        .folder_service
        .list_children(&ctx, query.parent_id)
        .await?;
    Ok(Json(json!({ "success": true, "data": folders })))
}

/// GET /api/folders/{id}/path
///
/// Breadcrumbs: the ancestor chain from root down to the folder's parent.
pub async fn ancestor_path(
    State(state): State<AppState>,
    Actor(_ctx): Actor,
    Path(id): Path<FolderId>,
) -> Result<Json<Value>, ApiError> {
    let path = state.folder_service.ancestor_path(id).await?;
    Ok(Json(json!({ "success": true, "data": path })))
}
