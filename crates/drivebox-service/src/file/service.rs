//! File CRUD, listings, and the operations of the file menu.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::storage::BlobStore;
use drivebox_core::types::{FileId, FolderId, ListFilter};
use drivebox_database::repositories::{FileRepository, FolderRepository};
use drivebox_entity::file::{CreateFile, File};
use drivebox_entity::folder::Folder;
use drivebox_entity::resource::Resource;
use drivebox_storage::keys::object_key;

use crate::access::AccessMediator;
use crate::context::RequestContext;
use crate::permission::PermissionResolver;

/// How many folders a name search returns at most.
const SEARCH_FOLDER_LIMIT: usize = 5;
/// How many files a name search returns at most.
const SEARCH_FILE_LIMIT: usize = 10;

/// Handles file registration, listings, and per-file operations.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Folder repository (parent lookups).
    folder_repo: Arc<FolderRepository>,
    /// Permission resolver.
    resolver: Arc<PermissionResolver>,
    /// Access mediator for listing URLs.
    mediator: Arc<AccessMediator>,
    /// Blob store (copies).
    blob_store: Arc<dyn BlobStore>,
}

/// Request to register a completed upload.
///
/// The client uploads straight to the blob store; this call records the
/// resulting key as a file row.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UploadCompleteRequest {
    /// File name.
    pub name: String,
    /// The key the blob was uploaded under.
    pub storage_key: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Destination folder (`None` = root).
    pub folder_id: Option<FolderId>,
}

/// A file entry decorated with a mediated retrieval URL.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FileWithUrl {
    /// The file row.
    #[serde(flatten)]
    pub file: File,
    /// Signed retrieval URL, or `None` when one could not be issued.
    pub public_url: Option<String>,
}

/// One folder level as seen by the dashboard.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Listing {
    /// Folders in this view.
    pub folders: Vec<Folder>,
    /// Files in this view, with retrieval URLs.
    pub files: Vec<FileWithUrl>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        resolver: Arc<PermissionResolver>,
        mediator: Arc<AccessMediator>,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            resolver,
            mediator,
            blob_store,
        }
    }

    /// Records a completed upload as a file row owned by the caller.
    pub async fn upload_complete(
        &self,
        ctx: &RequestContext,
        req: UploadCompleteRequest,
    ) -> AppResult<File> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }
        if req.storage_key.trim().is_empty() {
            return Err(AppError::validation("Storage key cannot be empty"));
        }
        if req.size_bytes < 0 {
            return Err(AppError::validation("File size cannot be negative"));
        }

        if let Some(folder_id) = req.folder_id {
            let folder = self
                .folder_repo
                .find_by_id(folder_id)
                .await?
                .filter(|f| f.owner_id == ctx.user_id && !f.is_deleted);
            if folder.is_none() {
                return Err(AppError::validation(
                    "Destination folder does not exist or is not yours",
                ));
            }
        }

        let file = self
            .file_repo
            .create(&CreateFile {
                name: req.name,
                owner_id: ctx.user_id,
                folder_id: req.folder_id,
                storage_key: req.storage_key,
                mime_type: req.mime_type,
                size_bytes: req.size_bytes,
            })
            .await?;

        info!(user_id = %ctx.user_id, file_id = %file.id, "Upload recorded");

        Ok(file)
    }

    /// Lists the caller's resources in one view: a folder level, the
    /// starred set, or the trash. File entries carry mediated URLs.
    pub async fn list_resources(
        &self,
        ctx: &RequestContext,
        folder_id: Option<FolderId>,
        filter: ListFilter,
    ) -> AppResult<Listing> {
        let (folders, files) = match filter {
            ListFilter::Active => (
                self.folder_repo
                    .find_children(ctx.user_id, folder_id, false)
                    .await?,
                self.file_repo
                    .find_by_owner(ctx.user_id, folder_id, false)
                    .await?,
            ),
            ListFilter::Starred => (
                Vec::new(),
                self.file_repo.find_starred_by_owner(ctx.user_id).await?,
            ),
            // The trash is flat: everything flagged, wherever it lives.
            ListFilter::Trash => (
                self.folder_repo.find_deleted_by_owner(ctx.user_id).await?,
                self.file_repo.find_deleted_by_owner(ctx.user_id).await?,
            ),
        };

        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            let public_url = self.mediator.try_url(&file, ctx).await;
            entries.push(FileWithUrl { file, public_url });
        }

        Ok(Listing {
            folders,
            files: entries,
        })
    }

    /// Renames a file; the caller must be owner or editor.
    pub async fn rename_file(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
        new_name: &str,
    ) -> AppResult<File> {
        if new_name.trim().is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }

        let mut file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        self.resolver
            .require_mutate(&Resource::File(file.clone()), ctx)
            .await?;

        file.name = new_name.to_string();
        file.updated_at = Utc::now();
        self.file_repo.update(&file).await?;

        info!(user_id = %ctx.user_id, file_id = %file_id, "File renamed");

        Ok(file)
    }

    /// Moves a file to another folder (`None` = root). Owner-only; the
    /// destination must be a live folder of the same owner.
    pub async fn move_file(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
        destination: Option<FolderId>,
    ) -> AppResult<File> {
        let mut file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        self.resolver
            .require_owner(&Resource::File(file.clone()), ctx)?;

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
        }

        let old_folder = file.folder_id;
        file.folder_id = destination;
        file.updated_at = Utc::now();
        self.file_repo.update(&file).await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            from_folder = ?old_folder,
            to_folder = ?destination,
            "File moved"
        );

        Ok(file)
    }

    /// Duplicates a file: a fresh blob copy under a new key, a new row
    /// named `"name (Copy).ext"` in the same folder, star and trash flags
    /// reset. Owner-only — a grantee copy would plant a foreign-owned file
    /// in the owner's folder.
    pub async fn copy_file(&self, ctx: &RequestContext, file_id: FileId) -> AppResult<File> {
        let source = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        self.resolver
            .require_owner(&Resource::File(source.clone()), ctx)?;

        let new_name = source.copy_name();
        let new_key = object_key(source.owner_id, &new_name);

        self.blob_store.copy(&source.storage_key, &new_key).await?;

        let copy = self
            .file_repo
            .create(&CreateFile {
                name: new_name,
                owner_id: source.owner_id,
                folder_id: source.folder_id,
                storage_key: new_key,
                mime_type: source.mime_type.clone(),
                size_bytes: source.size_bytes,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            source_id = %file_id,
            new_id = %copy.id,
            "File copied"
        );

        Ok(copy)
    }

    /// Sets or clears the star flag. Owner-scoped: anyone else sees
    /// `NotFound`, like any other owner-filtered row lookup.
    pub async fn toggle_star(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
        value: bool,
    ) -> AppResult<File> {
        let mut file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .filter(|f| f.owner_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found("File not found"))?;

        file.is_starred = value;
        file.updated_at = Utc::now();
        self.file_repo.update(&file).await?;

        info!(user_id = %ctx.user_id, file_id = %file_id, starred = value, "Star toggled");

        Ok(file)
    }

    /// Substring name search over the caller's live folders and files.
    /// Queries shorter than two characters return nothing.
    pub async fn search(&self, ctx: &RequestContext, query: &str) -> AppResult<Listing> {
        let query = query.trim();
        if query.chars().count() < 2 {
            return Ok(Listing {
                folders: Vec::new(),
                files: Vec::new(),
            });
        }

        let folders = self
            .folder_repo
            .search_by_name(ctx.user_id, query, SEARCH_FOLDER_LIMIT)
            .await?;
        let files = self
            .file_repo
            .search_by_name(ctx.user_id, query, SEARCH_FILE_LIMIT)
            .await?;

        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            let public_url = self.mediator.try_url(&file, ctx).await;
            entries.push(FileWithUrl { file, public_url });
        }

        Ok(Listing {
            folders,
            files: entries,
        })
    }
}
