//! Shared test helpers for service integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use drivebox_core::result::AppResult;
use drivebox_core::traits::storage::{BlobStore, SignedUrl};
use drivebox_core::types::{FolderId, UserId};
use drivebox_database::repositories::{FileRepository, FolderRepository, ShareRepository};
use drivebox_entity::file::File;
use drivebox_entity::folder::Folder;
use drivebox_service::access::AccessMediator;
use drivebox_service::context::RequestContext;
use drivebox_service::file::FileService;
use drivebox_service::file::service::UploadCompleteRequest;
use drivebox_service::folder::FolderService;
use drivebox_service::folder::service::CreateFolderRequest;
use drivebox_service::folder::tree::TreeWalker;
use drivebox_service::lifecycle::LifecycleService;
use drivebox_service::permission::PermissionResolver;
use drivebox_service::share::ShareService;
use drivebox_storage::memory::MemoryBlobStore;

/// Fully wired service stack over in-memory repositories.
pub struct TestApp {
    /// File repository.
    pub file_repo: Arc<FileRepository>,
    /// Folder repository.
    pub folder_repo: Arc<FolderRepository>,
    /// Share repository.
    pub share_repo: Arc<ShareRepository>,
    /// The blob store services were wired with.
    pub blob_store: Arc<dyn BlobStore>,
    /// Access mediator.
    pub mediator: Arc<AccessMediator>,
    /// Lifecycle service.
    pub lifecycle: LifecycleService,
    /// File service.
    pub files: FileService,
    /// Folder service.
    pub folders: FolderService,
    /// Share service.
    pub shares: ShareService,
}

impl TestApp {
    /// Wire the full stack over an in-memory blob store.
    pub fn new() -> Self {
        Self::with_blob_store(Arc::new(MemoryBlobStore::new("http://test")))
    }

    /// Wire the full stack over the given blob store.
    pub fn with_blob_store(blob_store: Arc<dyn BlobStore>) -> Self {
        let file_repo = Arc::new(FileRepository::new());
        let folder_repo = Arc::new(FolderRepository::new());
        let share_repo = Arc::new(ShareRepository::new());

        let resolver = Arc::new(PermissionResolver::new(share_repo.clone()));
        let tree = Arc::new(TreeWalker::new(folder_repo.clone()));
        let mediator = Arc::new(AccessMediator::new(
            resolver.clone(),
            blob_store.clone(),
            Duration::from_secs(3600),
        ));

        let lifecycle = LifecycleService::new(
            file_repo.clone(),
            folder_repo.clone(),
            share_repo.clone(),
            tree.clone(),
            resolver.clone(),
            blob_store.clone(),
        );
        let files = FileService::new(
            file_repo.clone(),
            folder_repo.clone(),
            resolver.clone(),
            mediator.clone(),
            blob_store.clone(),
        );
        let folders = FolderService::new(folder_repo.clone(), resolver.clone(), tree.clone());
        let shares = ShareService::new(
            share_repo.clone(),
            file_repo.clone(),
            folder_repo.clone(),
            mediator.clone(),
        );

        Self {
            file_repo,
            folder_repo,
            share_repo,
            blob_store,
            mediator,
            lifecycle,
            files,
            folders,
            shares,
        }
    }
}

/// A fresh actor with a random user id.
pub fn actor(email: &str) -> RequestContext {
    RequestContext::new(UserId::new(), email)
}

/// Create a folder owned by the actor.
pub async fn seed_folder(
    app: &TestApp,
    ctx: &RequestContext,
    name: &str,
    parent_id: Option<FolderId>,
) -> Folder {
    app.folders
        .create_folder(
            ctx,
            CreateFolderRequest {
                name: name.to_string(),
                parent_id,
            },
        )
        .await
        .expect("seed folder")
}

/// Upload a blob and register the file row for the actor.
pub async fn seed_file(
    app: &TestApp,
    ctx: &RequestContext,
    name: &str,
    folder_id: Option<FolderId>,
) -> File {
    let storage_key = format!("{}/{}", ctx.user_id, name);
    app.blob_store
        .put(&storage_key, Bytes::from(name.to_string()))
        .await
        .expect("seed blob");

    app.files
        .upload_complete(
            ctx,
            UploadCompleteRequest {
                name: name.to_string(),
                storage_key,
                mime_type: Some("text/plain".to_string()),
                size_bytes: name.len() as i64,
                folder_id,
            },
        )
        .await
        .expect("seed file")
}

/// Blob store double that records every key passed to `remove` before
/// delegating to an in-memory store.
#[derive(Debug)]
pub struct CountingBlobStore {
    inner: MemoryBlobStore,
    removed: Mutex<Vec<String>>,
}

impl CountingBlobStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryBlobStore::new("http://test"),
            removed: Mutex::new(Vec::new()),
        }
    }

    /// Every key passed to `remove`, in call order.
    pub fn removed_keys(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStore for CountingBlobStore {
    fn provider_type(&self) -> &str {
        "counting"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        self.inner.put(key, data).await
    }

    async fn remove(&self, keys: &[String]) -> AppResult<()> {
        self.removed.lock().unwrap().extend(keys.iter().cloned());
        self.inner.remove(keys).await
    }

    async fn copy(&self, src: &str, dst: &str) -> AppResult<()> {
        self.inner.copy(src, dst).await
    }

    async fn sign(&self, key: &str, ttl: Duration) -> AppResult<SignedUrl> {
        self.inner.sign(key, ttl).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }
}

/// Blob store double whose `remove` fails while the flag is set.
#[derive(Debug)]
pub struct FlakyBlobStore {
    inner: MemoryBlobStore,
    fail_removes: AtomicBool,
}

impl FlakyBlobStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryBlobStore::new("http://test"),
            fail_removes: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_removes.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobStore for FlakyBlobStore {
    fn provider_type(&self) -> &str {
        "flaky"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        self.inner.put(key, data).await
    }

    async fn remove(&self, keys: &[String]) -> AppResult<()> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(drivebox_core::error::AppError::upstream_storage(
                "Blob store is down",
            ));
        }
        self.inner.remove(keys).await
    }

    async fn copy(&self, src: &str, dst: &str) -> AppResult<()> {
        self.inner.copy(src, dst).await
    }

    async fn sign(&self, key: &str, ttl: Duration) -> AppResult<SignedUrl> {
        self.inner.sign(key, ttl).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }
}
