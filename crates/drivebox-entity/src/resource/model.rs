//! A resource is either a file or a folder.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use drivebox_core::types::UserId;

use crate::file::File;
use crate::folder::Folder;

/// Type of a shareable / deletable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// A file.
    File,
    /// A folder.
    Folder,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Folder => write!(f, "folder"),
        }
    }
}

/// A loaded resource, polymorphic over the two variants.
///
/// Gives permission and lifecycle code uniform access to the fields both
/// variants carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resource {
    /// A file resource.
    File(File),
    /// A folder resource.
    Folder(Folder),
}

impl Resource {
    /// The resource's opaque identifier.
    pub fn id(&self) -> Uuid {
        match self {
            Self::File(f) => f.id.into_uuid(),
            Self::Folder(f) => f.id.into_uuid(),
        }
    }

    /// The resource owner.
    pub fn owner_id(&self) -> UserId {
        match self {
            Self::File(f) => f.owner_id,
            Self::Folder(f) => f.owner_id,
        }
    }

    /// The resource name.
    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => &f.name,
            Self::Folder(f) => &f.name,
        }
    }

    /// Whether the resource is in the trash.
    pub fn is_deleted(&self) -> bool {
        match self {
            Self::File(f) => f.is_deleted,
            Self::Folder(f) => f.is_deleted,
        }
    }

    /// Which variant this resource is.
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Self::File(_) => ResourceType::File,
            Self::Folder(_) => ResourceType::Folder,
        }
    }
}

impl From<File> for Resource {
    fn from(file: File) -> Self {
        Self::File(file)
    }
}

impl From<Folder> for Resource {
    fn from(folder: Folder) -> Self {
        Self::Folder(folder)
    }
}
