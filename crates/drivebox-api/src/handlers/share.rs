//! Share management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::{Value, json};

use drivebox_core::types::ShareId;
use drivebox_service::share::service::InviteRequest as SvcInvite;

use crate::dto::request::{ChangeRoleRequest, InviteShareRequest, SharesQuery};
use crate::error::ApiError;
use crate::extractors::Actor;
use crate::handlers::validate_dto;
use crate::state::AppState;

/// POST /api/shares
pub async fn invite(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Json(req): Json<InviteShareRequest>,
) -> Result<Json<Value>, ApiError> {
    validate_dto(&req)?;

    let grant = state
        .share_service
        .invite(
            &ctx,
            SvcInvite {
                resource_id: req.resource_id,
                resource_type: req.resource_type,
                grantee_email: req.grantee_email,
                role: req.role,
            },
        )
        .await?;

    Ok(Json(json!({ "success": true, "data": grant })))
}

/// GET /api/shares?resource_id=...
pub async fn list_by_resource(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Query(query): Query<SharesQuery>,
) -> Result<Json<Value>, ApiError> {
    let grants = state
        .share_service
        .list_by_resource(&ctx, query.resource_id)
        .await?;
    Ok(Json(json!({ "success": true, "data": grants })))
}

/// DELETE /api/shares/{id}
pub async fn revoke(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Path(id): Path<ShareId>,
) -> Result<Json<Value>, ApiError> {
    state.share_service.revoke(&ctx, id).await?;
    Ok(Json(
        json!({ "success": true, "data": { "message": "Share revoked" } }),
    ))
}

/// PUT /api/shares/{id}
pub async fn change_role(
    State(state): State<AppState>,
    Actor(ctx): Actor,
    Path(id): Path<ShareId>,
    Json(req): Json<ChangeRoleRequest>,
) -> Result<Json<Value>, ApiError> {
    let grant = state.share_service.change_role(&ctx, id, req.role).await?;
    Ok(Json(json!({ "success": true, "data": grant })))
}

/// GET /api/shared-with-me
pub async fn shared_with_me(
    State(state): State<AppState>,
    Actor(ctx): Actor,
) -> Result<Json<Value>, ApiError> {
    let listing = state.share_service.shared_with_me(&ctx).await?;
    Ok(Json(json!({ "success": true, "data": listing })))
}
