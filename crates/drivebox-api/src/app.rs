//! Application wiring and the serve entry point.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use drivebox_core::config::AppConfig;
use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::storage::BlobStore;
use drivebox_database::repositories::{FileRepository, FolderRepository, ShareRepository};
use drivebox_service::access::AccessMediator;
use drivebox_service::file::FileService;
use drivebox_service::folder::{FolderService, TreeWalker};
use drivebox_service::lifecycle::LifecycleService;
use drivebox_service::permission::PermissionResolver;
use drivebox_service::share::ShareService;
use drivebox_storage::manager::build_blob_store;

use crate::router::build_router;
use crate::state::AppState;

/// Wire repositories and services into an [`AppState`].
pub fn build_state(config: AppConfig, blob_store: Arc<dyn BlobStore>) -> AppState {
    let file_repo = Arc::new(FileRepository::new());
    let folder_repo = Arc::new(FolderRepository::new());
    let share_repo = Arc::new(ShareRepository::new());

    let resolver = Arc::new(PermissionResolver::new(share_repo.clone()));
    let tree = Arc::new(TreeWalker::new(folder_repo.clone()));
    let mediator = Arc::new(AccessMediator::new(
        resolver.clone(),
        blob_store.clone(),
        Duration::from_secs(config.storage.signed_url_ttl_seconds),
    ));

    let lifecycle = Arc::new(LifecycleService::new(
        file_repo.clone(),
        folder_repo.clone(),
        share_repo.clone(),
        tree.clone(),
        resolver.clone(),
        blob_store.clone(),
    ));
    let file_service = Arc::new(FileService::new(
        file_repo.clone(),
        folder_repo.clone(),
        resolver.clone(),
        mediator.clone(),
        blob_store.clone(),
    ));
    let folder_service = Arc::new(FolderService::new(
        folder_repo.clone(),
        resolver.clone(),
        tree.clone(),
    ));
    let share_service = Arc::new(ShareService::new(
        share_repo.clone(),
        file_repo.clone(),
        folder_repo.clone(),
        mediator.clone(),
    ));

    AppState {
        config: Arc::new(config),
        blob_store,
        file_repo,
        folder_repo,
        share_repo,
        resolver,
        tree,
        mediator,
        lifecycle,
        file_service,
        folder_service,
        share_service,
    }
}

/// Build the blob store from configuration, wire the state, and serve the
/// API until the process is stopped.
pub async fn serve(config: AppConfig) -> AppResult<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let blob_store = build_blob_store(&config.storage).await?;
    let state = build_state(config, blob_store);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "Drivebox API listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}
