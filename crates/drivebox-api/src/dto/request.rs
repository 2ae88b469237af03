//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use drivebox_core::types::{FolderId, ListFilter};
use drivebox_entity::resource::ResourceType;
use drivebox_entity::share::ShareRole;

/// Listing query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    /// Folder to list (`None` = root).
    pub folder_id: Option<FolderId>,
    /// Listing scope; defaults to the active view.
    #[serde(default)]
    pub filter: ListFilter,
}

/// Folder-children query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildrenQuery {
    /// Parent folder (`None` = root).
    pub parent_id: Option<FolderId>,
}

/// Name search query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    /// Substring to search for.
    pub q: String,
}

/// Share listing query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SharesQuery {
    /// Resource whose grants to list.
    pub resource_id: Uuid,
}

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name is required"))]
    pub name: String,
    /// Parent folder ID.
    pub parent_id: Option<FolderId>,
}

/// Upload completion request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadCompleteRequest {
    /// File name.
    #[validate(length(min = 1, max = 255, message = "File name is required"))]
    pub name: String,
    /// Key the blob was uploaded under.
    #[validate(length(min = 1, message = "Storage key is required"))]
    pub storage_key: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Size in bytes.
    #[validate(range(min = 0, message = "File size cannot be negative"))]
    pub size_bytes: i64,
    /// Destination folder.
    pub folder_id: Option<FolderId>,
}

/// Rename request body (files and folders).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    /// The new name.
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty"))]
    pub new_name: String,
}

/// Move request body (files and folders).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Destination folder (`None` = root).
    pub destination_folder_id: Option<FolderId>,
}

/// Star toggle request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarRequest {
    /// New star value.
    pub value: bool,
}

/// Share invite request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InviteShareRequest {
    /// Resource to share.
    pub resource_id: Uuid,
    /// Its type.
    pub resource_type: ResourceType,
    /// Grantee e-mail.
    #[validate(email(message = "A valid grantee e-mail is required"))]
    pub grantee_email: String,
    /// Capability to grant.
    pub role: ShareRole,
}

/// Role change request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    /// The new role.
    pub role: ShareRole,
}
