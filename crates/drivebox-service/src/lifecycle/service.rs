//! Soft delete, restore, permanent delete, and trash emptying.
//!
//! Every resource moves through `Active → Trashed → {Active, Purged}`.
//! Trashing and restoring only flip the visibility flag; purging removes
//! blobs first and metadata second, so a failed blob removal leaves the
//! records that still name the affected keys and the purge can simply be
//! re-invoked. All deletes are "delete if exists" — concurrent purges of
//! overlapping subtrees must never fail on rows or blobs that are already
//! gone.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::storage::BlobStore;
use drivebox_core::types::{FileId, FolderId, UserId};
use drivebox_database::repositories::{FileRepository, FolderRepository, ShareRepository};
use drivebox_entity::file::File;
use drivebox_entity::resource::{Resource, ResourceType};

use crate::context::RequestContext;
use crate::folder::tree::TreeWalker;
use crate::permission::PermissionResolver;

/// What a purge actually removed.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct PurgeReport {
    /// Folder rows removed.
    pub folders_deleted: u64,
    /// File rows removed.
    pub files_deleted: u64,
    /// Unique storage keys passed to blob removal.
    pub blobs_removed: u64,
}

/// Orchestrates the resource state machine across the metadata store and
/// the blob store.
#[derive(Debug, Clone)]
pub struct LifecycleService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Share repository (grants die with their resources).
    share_repo: Arc<ShareRepository>,
    /// Tree walker for descendant expansion.
    tree: Arc<TreeWalker>,
    /// Permission resolver.
    resolver: Arc<PermissionResolver>,
    /// Blob store.
    blob_store: Arc<dyn BlobStore>,
}

impl LifecycleService {
    /// Creates a new lifecycle service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        share_repo: Arc<ShareRepository>,
        tree: Arc<TreeWalker>,
        resolver: Arc<PermissionResolver>,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            share_repo,
            tree,
            resolver,
            blob_store,
        }
    }

    /// Load a resource of the given type by its opaque id.
    async fn load_resource(&self, resource_type: ResourceType, id: Uuid) -> AppResult<Resource> {
        match resource_type {
            ResourceType::File => self
                .file_repo
                .find_by_id(FileId::from_uuid(id))
                .await?
                .map(Resource::File)
                .ok_or_else(|| AppError::not_found("File not found")),
            ResourceType::Folder => self
                .folder_repo
                .find_by_id(FolderId::from_uuid(id))
                .await?
                .map(Resource::Folder)
                .ok_or_else(|| AppError::not_found("Folder not found")),
        }
    }

    /// Moves a resource to the trash. Requires owner or editor.
    ///
    /// Trashing a folder also hides its *direct* file children. Subfolders
    /// keep their own flag — trash is a shallow hide, and the full subtree
    /// is only resolved when something is actually destroyed.
    pub async fn soft_delete(
        &self,
        resource_type: ResourceType,
        id: Uuid,
        ctx: &RequestContext,
    ) -> AppResult<()> {
        let resource = self.load_resource(resource_type, id).await?;
        self.resolver.require_mutate(&resource, ctx).await?;

        match resource {
            Resource::File(mut file) => {
                file.is_deleted = true;
                file.updated_at = Utc::now();
                self.file_repo.update(&file).await?;
            }
            Resource::Folder(mut folder) => {
                folder.is_deleted = true;
                folder.updated_at = Utc::now();
                self.folder_repo.update(&folder).await?;

                let children = self
                    .file_repo
                    .find_by_owner(folder.owner_id, Some(folder.id), false)
                    .await?;
                for mut child in children {
                    child.is_deleted = true;
                    child.updated_at = Utc::now();
                    self.file_repo.update(&child).await?;
                }
            }
        }

        info!(user_id = %ctx.user_id, resource_id = %id, resource_type = %resource_type, "Resource trashed");

        Ok(())
    }

    /// Restores a trashed resource. Owner-only — restore reverses a
    /// destructive state and is not delegated to editors.
    ///
    /// No cascade: children trashed along the way (or individually) keep
    /// their own flag.
    pub async fn restore(
        &self,
        resource_type: ResourceType,
        id: Uuid,
        ctx: &RequestContext,
    ) -> AppResult<()> {
        let resource = self.load_resource(resource_type, id).await?;
        self.resolver.require_owner(&resource, ctx)?;

        match resource {
            Resource::File(mut file) => {
                file.is_deleted = false;
                file.updated_at = Utc::now();
                self.file_repo.update(&file).await?;
            }
            Resource::Folder(mut folder) => {
                folder.is_deleted = false;
                folder.updated_at = Utc::now();
                self.folder_repo.update(&folder).await?;
            }
        }

        info!(user_id = %ctx.user_id, resource_id = %id, resource_type = %resource_type, "Resource restored");

        Ok(())
    }

    /// Irreversibly removes a resource — and, for a folder, its entire
    /// subtree — from both stores. Owner-only.
    pub async fn permanent_delete(
        &self,
        resource_type: ResourceType,
        id: Uuid,
        ctx: &RequestContext,
    ) -> AppResult<PurgeReport> {
        let resource = self.load_resource(resource_type, id).await?;
        self.resolver.require_owner(&resource, ctx)?;

        let report = match resource {
            Resource::File(file) => {
                let folder_ids = HashSet::new();
                self.purge(vec![file], folder_ids).await?
            }
            Resource::Folder(folder) => {
                let mut all_folder_ids = self
                    .tree
                    .descendant_folder_ids(folder.owner_id, &[folder.id])
                    .await?;
                all_folder_ids.insert(folder.id);

                let files = self
                    .file_repo
                    .find_by_folder_ids(folder.owner_id, &all_folder_ids)
                    .await?;
                self.purge(files, all_folder_ids).await?
            }
        };

        info!(
            user_id = %ctx.user_id,
            resource_id = %id,
            resource_type = %resource_type,
            folders = report.folders_deleted,
            files = report.files_deleted,
            blobs = report.blobs_removed,
            "Resource permanently deleted"
        );

        Ok(report)
    }

    /// Purges everything in an owner's trash.
    ///
    /// The purge set is computed in one pass: trashed folders expanded
    /// through their descendants (nested folders inherit destruction even
    /// when never individually flagged), unioned with explicitly trashed
    /// files and with files living inside any doomed folder, deduplicated
    /// by id so each storage key is removed at most once.
    pub async fn empty_trash(&self, owner_id: UserId) -> AppResult<PurgeReport> {
        let trashed_folders = self.folder_repo.find_deleted_by_owner(owner_id).await?;
        let seed_ids: Vec<FolderId> = trashed_folders.iter().map(|f| f.id).collect();

        let mut doomed_folders = self.tree.descendant_folder_ids(owner_id, &seed_ids).await?;
        doomed_folders.extend(seed_ids);

        let explicit = self.file_repo.find_deleted_by_owner(owner_id).await?;
        let implicit = self
            .file_repo
            .find_by_folder_ids(owner_id, &doomed_folders)
            .await?;

        let mut doomed_files: HashMap<FileId, File> = HashMap::new();
        for file in explicit.into_iter().chain(implicit) {
            doomed_files.insert(file.id, file);
        }

        let report = self
            .purge(doomed_files.into_values().collect(), doomed_folders)
            .await?;

        info!(
            owner_id = %owner_id,
            folders = report.folders_deleted,
            files = report.files_deleted,
            blobs = report.blobs_removed,
            "Trash emptied"
        );

        Ok(report)
    }

    /// Remove a batch of files and folders from both stores.
    ///
    /// Blob removal runs first: if it fails, the metadata rows naming the
    /// orphaned keys survive and the same purge can be retried. Grants on
    /// purged resources are destroyed last.
    async fn purge(
        &self,
        files: Vec<File>,
        folder_ids: HashSet<FolderId>,
    ) -> AppResult<PurgeReport> {
        let unique_keys: HashSet<String> =
            files.iter().map(|f| f.storage_key.clone()).collect();
        let keys: Vec<String> = unique_keys.into_iter().collect();

        if !keys.is_empty() {
            self.blob_store.remove(&keys).await?;
        }

        let file_ids: Vec<FileId> = files.iter().map(|f| f.id).collect();
        let files_deleted = self.file_repo.delete_many(&file_ids).await?;

        let folder_id_vec: Vec<FolderId> = folder_ids.iter().copied().collect();
        let folders_deleted = self.folder_repo.delete_many(&folder_id_vec).await?;

        let resource_ids: Vec<Uuid> = file_ids
            .iter()
            .map(|id| id.into_uuid())
            .chain(folder_id_vec.iter().map(|id| id.into_uuid()))
            .collect();
        if !resource_ids.is_empty() {
            self.share_repo.delete_by_resource_ids(&resource_ids).await?;
        }

        Ok(PurgeReport {
            folders_deleted,
            files_deleted,
            blobs_removed: keys.len() as u64,
        })
    }
}
