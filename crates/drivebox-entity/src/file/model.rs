//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivebox_core::types::{FileId, FolderId, UserId};

/// A file stored in Drivebox.
///
/// The record references its blob through `storage_key`; the blob itself
/// lives in the external store. `is_deleted` hides the file from normal
/// listings ("in trash") without touching the blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The file name (including extension).
    pub name: String,
    /// The file owner.
    pub owner_id: UserId,
    /// The folder containing this file (`None` = root).
    pub folder_id: Option<FolderId>,
    /// Opaque handle into the blob store.
    pub storage_key: String,
    /// MIME type of the file.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Whether the owner starred this file.
    pub is_starred: bool,
    /// Whether the file is in the trash.
    pub is_deleted: bool,
    /// When the file record was created.
    pub created_at: DateTime<Utc>,
    /// When the file record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }

    /// The name a duplicate of this file gets: `report.pdf` becomes
    /// `report (Copy).pdf`, an extensionless `notes` becomes `notes (Copy)`.
    pub fn copy_name(&self) -> String {
        match self.name.rsplit_once('.') {
            Some((base, ext)) if !base.is_empty() => format!("{base} (Copy).{ext}"),
            _ => format!("{} (Copy)", self.name),
        }
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file name.
    pub name: String,
    /// The file owner.
    pub owner_id: UserId,
    /// The folder to place the file in (`None` = root).
    pub folder_id: Option<FolderId>,
    /// Opaque handle into the blob store.
    pub storage_key: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
}
