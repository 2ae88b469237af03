//! Share grant CRUD and the grantee's view of shared resources.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::ShareId;
use drivebox_database::repositories::{FileRepository, FolderRepository, ShareRepository};
use drivebox_entity::file::File;
use drivebox_entity::folder::Folder;
use drivebox_entity::resource::{Resource, ResourceType};
use drivebox_entity::share::{CreateShare, ShareGrant, ShareRole};

use crate::access::AccessMediator;
use crate::context::RequestContext;

/// Manages share grants. All share management is owner-only: grants
/// confer read or edit capability, never the right to re-share.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share repository.
    share_repo: Arc<ShareRepository>,
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Access mediator for the grantee listing.
    mediator: Arc<AccessMediator>,
}

/// Request to invite a grantee to a resource.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InviteRequest {
    /// The resource being shared.
    pub resource_id: Uuid,
    /// Its type.
    pub resource_type: ResourceType,
    /// Grantee e-mail.
    pub grantee_email: String,
    /// Capability to grant.
    pub role: ShareRole,
}

/// A folder shared with the caller, with the granted role.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SharedFolderEntry {
    /// The folder.
    #[serde(flatten)]
    pub folder: Folder,
    /// The caller's granted role.
    pub role: ShareRole,
}

/// A file shared with the caller, with the granted role and a URL.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SharedFileEntry {
    /// The file.
    #[serde(flatten)]
    pub file: File,
    /// The caller's granted role.
    pub role: ShareRole,
    /// Signed retrieval URL, or `None` when one could not be issued.
    pub public_url: Option<String>,
}

/// Everything shared with one grantee.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SharedListing {
    /// Shared folders.
    pub folders: Vec<SharedFolderEntry>,
    /// Shared files.
    pub files: Vec<SharedFileEntry>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        share_repo: Arc<ShareRepository>,
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        mediator: Arc<AccessMediator>,
    ) -> Self {
        Self {
            share_repo,
            file_repo,
            folder_repo,
            mediator,
        }
    }

    /// Load the shared resource, failing when it does not exist.
    async fn load_resource(&self, resource_type: ResourceType, id: Uuid) -> AppResult<Resource> {
        match resource_type {
            ResourceType::File => self
                .file_repo
                .find_by_id(id.into())
                .await?
                .map(Resource::File)
                .ok_or_else(|| AppError::not_found("File not found")),
            ResourceType::Folder => self
                .folder_repo
                .find_by_id(id.into())
                .await?
                .map(Resource::Folder)
                .ok_or_else(|| AppError::not_found("Folder not found")),
        }
    }

    /// Invites a grantee to a resource the caller owns.
    ///
    /// A second invite for the same `(resource, e-mail)` pair fails with
    /// `Conflict` and leaves the existing grant untouched.
    pub async fn invite(&self, ctx: &RequestContext, req: InviteRequest) -> AppResult<ShareGrant> {
        if req.grantee_email.trim().is_empty() {
            return Err(AppError::validation("Grantee e-mail cannot be empty"));
        }

        let resource = self.load_resource(req.resource_type, req.resource_id).await?;
        if resource.owner_id() != ctx.user_id {
            return Err(AppError::access_denied(
                "Only the owner can manage sharing",
            ));
        }

        let grant = self
            .share_repo
            .create(&CreateShare {
                resource_id: req.resource_id,
                resource_type: req.resource_type,
                grantee_email: req.grantee_email,
                role: req.role,
                owner_id: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            share_id = %grant.id,
            resource_id = %grant.resource_id,
            role = ?grant.role,
            "Share grant created"
        );

        Ok(grant)
    }

    /// Revokes a grant the caller issued.
    pub async fn revoke(&self, ctx: &RequestContext, share_id: ShareId) -> AppResult<()> {
        let grant = self
            .share_repo
            .find_by_id(share_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        if grant.owner_id != ctx.user_id {
            return Err(AppError::access_denied(
                "Only the owner can manage sharing",
            ));
        }

        self.share_repo.delete(share_id).await?;

        info!(user_id = %ctx.user_id, share_id = %share_id, "Share grant revoked");

        Ok(())
    }

    /// Changes the role on a grant the caller issued.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        share_id: ShareId,
        role: ShareRole,
    ) -> AppResult<ShareGrant> {
        let mut grant = self
            .share_repo
            .find_by_id(share_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        if grant.owner_id != ctx.user_id {
            return Err(AppError::access_denied(
                "Only the owner can manage sharing",
            ));
        }

        grant.role = role;
        self.share_repo.update(&grant).await?;

        info!(user_id = %ctx.user_id, share_id = %share_id, role = ?role, "Share role changed");

        Ok(grant)
    }

    /// Lists the grants on a resource the caller owns.
    pub async fn list_by_resource(
        &self,
        ctx: &RequestContext,
        resource_id: Uuid,
    ) -> AppResult<Vec<ShareGrant>> {
        let grants = self.share_repo.find_by_resource(resource_id).await?;
        if grants.iter().any(|g| g.owner_id != ctx.user_id) {
            return Err(AppError::access_denied(
                "Only the owner can manage sharing",
            ));
        }
        Ok(grants)
    }

    /// Everything shared with the caller, resolved to live resources.
    ///
    /// Grants survive trashing, but trash is a visibility state: grantees
    /// share the owner's view, so trashed resources are skipped.
    pub async fn shared_with_me(&self, ctx: &RequestContext) -> AppResult<SharedListing> {
        let grants = self.share_repo.find_by_grantee_email(&ctx.email).await?;

        let mut folders = Vec::new();
        let mut files = Vec::new();

        for grant in grants {
            match grant.resource_type {
                ResourceType::Folder => {
                    if let Some(folder) = self
                        .folder_repo
                        .find_by_id(grant.resource_id.into())
                        .await?
                        .filter(|f| !f.is_deleted)
                    {
                        folders.push(SharedFolderEntry {
                            folder,
                            role: grant.role,
                        });
                    }
                }
                ResourceType::File => {
                    if let Some(file) = self
                        .file_repo
                        .find_by_id(grant.resource_id.into())
                        .await?
                        .filter(|f| !f.is_deleted)
                    {
                        let public_url = self.mediator.try_url(&file, ctx).await;
                        files.push(SharedFileEntry {
                            file,
                            role: grant.role,
                            public_url,
                        });
                    }
                }
            }
        }

        Ok(SharedListing { folders, files })
    }
}
