//! File-specific handlers: upload completion, copy, star, mediated URLs.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

use drivebox_core::error::AppError;
use drivebox_core::types::FileId;
use drivebox_service::file::service::UploadCompleteRequest as SvcUploadComplete;

use crate::dto::request::{StarRequest, UploadCompleteRequest};
use crate::error::ApiError;
use crate::extractors::Actor;
use crate::handlers::validate_dto;
use crate::state::AppState;

/// POST /api/files/upload-complete
pub async fn upload_complete(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Json(req): Json<UploadCompleteRequest>,
) -> Result<Json<Value>, ApiError> {
    validate_dto(&req)?;

    let file = state
        .file_service
        .upload_complete(
            &ctx,
            SvcUploadComplete {
                name: req.name,
                storage_key: req.storage_key,
                mime_type: req.mime_type,
                size_bytes: req.size_bytes,
                folder_id: req.folder_id,
            },
        )
        .await?;

    Ok(Json(json!({ "success": true, "data": file })))
}

/// POST /api/files/{id}/copy
pub async fn copy_file(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Path(id): Path<FileId>,
) -> Result<Json<Value>, ApiError> {
    let copy = state.file_service.copy_file(&ctx, id).await?;
    Ok(Json(json!({ "success": true, "data": copy })))
}

/// PUT /api/files/{id}/star
pub async fn toggle_star(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Path(id): Path<FileId>,
    Json(req): Json<StarRequest>,
) -> Result<Json<Value>, ApiError> {
    let file = state.file_service.toggle_star(&ctx, id, req.value).await?;
    Ok(Json(json!({ "success": true, "data": file })))
}

/// GET /api/files/{id}/url
///
/// The one route that hands out a retrieval URL; everything funnels
/// through the access mediator.
pub async fn mediate_access(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Path(id): Path<FileId>,
) -> Result<Json<Value>, ApiError> {
    let file = state
        .file_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("File not found"))?;

    let signed = state.mediator.mediate(&file, &ctx).await?;

    Ok(Json(json!({ "success": true, "data": signed })))
}
