//! Share grant entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use drivebox_core::types::{ShareId, UserId};

use crate::resource::ResourceType;

/// Capability a grant confers on its grantee.
///
/// Owners are never represented by a grant; ownership is a property of
/// the resource itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareRole {
    /// Can edit content and metadata.
    Editor,
    /// Read-only access.
    Viewer,
}

/// A grant conferring access to a file or folder to a non-owner, keyed by
/// grantee e-mail.
///
/// At most one grant exists per `(resource_id, grantee_email)` pair; a
/// second invite for the same pair is a conflict, not an overwrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareGrant {
    /// Unique grant identifier.
    pub id: ShareId,
    /// ID of the shared resource.
    pub resource_id: Uuid,
    /// Type of resource being shared.
    pub resource_type: ResourceType,
    /// E-mail of the user the resource is shared with.
    pub grantee_email: String,
    /// Capability granted.
    pub role: ShareRole,
    /// Owner of the shared resource (the inviter).
    pub owner_id: UserId,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new share grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShare {
    /// ID of the resource.
    pub resource_id: Uuid,
    /// Type of the resource.
    pub resource_type: ResourceType,
    /// E-mail of the grantee.
    pub grantee_email: String,
    /// Capability to grant.
    pub role: ShareRole,
    /// Owner of the resource.
    pub owner_id: UserId,
}
