//! Blob store provider construction from configuration.

use std::sync::Arc;

use tracing::info;

use drivebox_core::config::storage::StorageConfig;
use drivebox_core::result::AppResult;
use drivebox_core::traits::storage::BlobStore;
use drivebox_core::error::AppError;

use crate::local::LocalBlobStore;
use crate::memory::MemoryBlobStore;

/// Build the configured blob store provider.
pub async fn build_blob_store(config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    let store: Arc<dyn BlobStore> = match config.provider.as_str() {
        "memory" => Arc::new(MemoryBlobStore::new(config.public_base_url.clone())),
        "local" => Arc::new(
            LocalBlobStore::new(&config.root_path, config.public_base_url.clone()).await?,
        ),
        other => {
            return Err(AppError::configuration(format!(
                "Unknown blob store provider: {other}"
            )));
        }
    };

    info!(provider = store.provider_type(), "Blob store initialized");
    Ok(store)
}
