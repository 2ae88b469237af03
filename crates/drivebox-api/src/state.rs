//! Application state shared across all handlers.

use std::sync::Arc;

use drivebox_core::config::AppConfig;
use drivebox_core::traits::storage::BlobStore;

use drivebox_database::repositories::{FileRepository, FolderRepository, ShareRepository};

use drivebox_service::access::AccessMediator;
use drivebox_service::file::FileService;
use drivebox_service::folder::{FolderService, TreeWalker};
use drivebox_service::lifecycle::LifecycleService;
use drivebox_service::permission::PermissionResolver;
use drivebox_service::share::ShareService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Blob store provider
    pub blob_store: Arc<dyn BlobStore>,

    // ── Repositories ─────────────────────────────────────────
    /// File repository
    pub file_repo: Arc<FileRepository>,
    /// Folder repository
    pub folder_repo: Arc<FolderRepository>,
    /// Share repository
    pub share_repo: Arc<ShareRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Permission resolver
    pub resolver: Arc<PermissionResolver>,
    /// Tree walker
    pub tree: Arc<TreeWalker>,
    /// Access mediator
    pub mediator: Arc<AccessMediator>,
    /// Lifecycle service
    pub lifecycle: Arc<LifecycleService>,
    /// File service
    pub file_service: Arc<FileService>,
    /// Folder service
    pub folder_service: Arc<FolderService>,
    /// Share service
    pub share_service: Arc<ShareService>,
}
