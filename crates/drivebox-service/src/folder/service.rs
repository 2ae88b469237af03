//! Folder CRUD and ancestry resolution.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::FolderId;
use drivebox_database::repositories::FolderRepository;
use drivebox_entity::folder::{CreateFolder, Folder};
use drivebox_entity::resource::Resource;

use crate::context::RequestContext;
use crate::folder::tree::TreeWalker;
use crate::permission::PermissionResolver;

/// Handles folder creation, renaming, moving, and ancestry lookups.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Permission resolver.
    resolver: Arc<PermissionResolver>,
    /// Tree walker (cycle checks on moves).
    tree: Arc<TreeWalker>,
}

/// Request to create a folder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder (`None` = root).
    pub parent_id: Option<FolderId>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        resolver: Arc<PermissionResolver>,
        tree: Arc<TreeWalker>,
    ) -> Self {
        Self {
            folder_repo,
            resolver,
            tree,
        }
    }

    /// Creates a folder, optionally inside a parent the caller owns.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> AppResult<Folder> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        if let Some(parent_id) = req.parent_id {
            let parent = self
                .folder_repo
                .find_by_id(parent_id)
                .await?
                .filter(|p| p.owner_id == ctx.user_id && !p.is_deleted);
            if parent.is_none() {
                return Err(AppError::access_denied(
                    "Parent folder not found or access denied",
                ));
            }
        }

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                name: req.name,
                owner_id: ctx.user_id,
                parent_id: req.parent_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, folder_id = %folder.id, "Folder created");

        Ok(folder)
    }

    /// Lists the caller's live folders under one parent (`None` = root).
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        parent_id: Option<FolderId>,
    ) -> AppResult<Vec<Folder>> {
        self.folder_repo
            .find_children(ctx.user_id, parent_id, false)
            .await
    }

    /// Renames a folder; the caller must be owner or editor.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        new_name: &str,
    ) -> AppResult<Folder> {
        if new_name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        let mut folder = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        self.resolver
            .require_mutate(&Resource::Folder(folder.clone()), ctx)
            .await?;

        folder.name = new_name.to_string();
        folder.updated_at = Utc::now();
        self.folder_repo.update(&folder).await?;

        info!(user_id = %ctx.user_id, folder_id = %folder_id, "Folder renamed");

        Ok(folder)
    }

    /// Moves a folder under a new parent (`None` = root). Owner-only.
    ///
    /// The destination must be a live folder of the same owner and must
    /// not lie inside the moved subtree — the parent graph stays acyclic.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        destination: Option<FolderId>,
    ) -> AppResult<Folder> {
        let mut folder = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        self.resolver
            .require_owner(&Resource::Folder(folder.clone()), ctx)?;

        if let Some(dest_id) = destination {
            let dest = self
                .folder_repo
                .find_by_id(dest_id)
                .await?
                .filter(|d| d.owner_id == ctx.user_id && !d.is_deleted);
            if dest.is_none() {
                return Err(AppError::access_denied(
                    "Destination folder not found or access denied",
                ));
            }

            let subtree: HashSet<FolderId> = self
                .tree
                .descendant_folder_ids(ctx.user_id, &[folder_id])
                .await?;
            if dest_id == folder_id || subtree.contains(&dest_id) {
                return Err(AppError::validation(
                    "Cannot move a folder into its own subtree",
                ));
            }
        }

        let old_parent = folder.parent_id;
        folder.parent_id = destination;
        folder.updated_at = Utc::now();
        self.folder_repo.update(&folder).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            from_parent = ?old_parent,
            to_parent = ?destination,
            "Folder moved"
        );

        Ok(folder)
    }

    /// Returns the ancestor folders of `folder_id`, ordered root first,
    /// ending at the immediate parent. Fails with `NotFound` when the
    /// parent chain is broken.
    pub async fn ancestor_path(&self, folder_id: FolderId) -> AppResult<Vec<Folder>> {
        let folder = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        let mut chain = Vec::new();
        let mut seen: HashSet<FolderId> = HashSet::from([folder.id]);
        let mut cursor = folder.parent_id;

        while let Some(parent_id) = cursor {
            if !seen.insert(parent_id) {
                return Err(AppError::internal("Folder ancestry contains a cycle"));
            }
            let parent = self
                .folder_repo
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::not_found("Ancestor chain is broken"))?;
            cursor = parent.parent_id;
            chain.push(parent);
        }

        chain.reverse();
        Ok(chain)
    }
}
