//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivebox_core::types::{FolderId, UserId};

/// A folder in the file hierarchy.
///
/// The tree is encoded through `parent_id` back-references; a folder's
/// parent, when present, belongs to the same owner and the graph is
/// acyclic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// The folder owner.
    pub owner_id: UserId,
    /// Parent folder ID (`None` for root folders).
    pub parent_id: Option<FolderId>,
    /// Whether the folder is in the trash.
    pub is_deleted: bool,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// The folder owner.
    pub owner_id: UserId,
    /// Parent folder (`None` for root).
    pub parent_id: Option<FolderId>,
}
