//! The single chokepoint that turns a storage key into a retrieval URL.
//!
//! Signing bypasses every permission check, so no other component may call
//! the blob store's signer or expose a raw `storage_key` to a caller. All
//! URL production funnels through [`AccessMediator::mediate`].

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::storage::{BlobStore, SignedUrl};
use drivebox_entity::file::File;
use drivebox_entity::resource::Resource;

use crate::context::RequestContext;
use crate::permission::PermissionResolver;

/// Issues signed, time-limited retrieval URLs after a permission check.
#[derive(Debug, Clone)]
pub struct AccessMediator {
    /// Permission resolver.
    resolver: Arc<PermissionResolver>,
    /// Blob store.
    blob_store: Arc<dyn BlobStore>,
    /// Lifetime of issued URLs.
    url_ttl: Duration,
}

impl AccessMediator {
    /// Creates a new access mediator issuing URLs valid for `url_ttl`.
    pub fn new(
        resolver: Arc<PermissionResolver>,
        blob_store: Arc<dyn BlobStore>,
        url_ttl: Duration,
    ) -> Self {
        Self {
            resolver,
            blob_store,
            url_ttl,
        }
    }

    /// Issue a signed URL for a file the actor may read.
    ///
    /// The actor must be the owner or hold an explicit grant; the strict
    /// default Viewer role is *not* enough here — a resource that was
    /// never shared must not become retrievable.
    pub async fn mediate(&self, file: &File, ctx: &RequestContext) -> AppResult<SignedUrl> {
        let role = self
            .resolver
            .resolve_explicit(&Resource::File(file.clone()), ctx)
            .await?;
        if role.is_none() {
            return Err(AppError::access_denied(
                "This file has not been shared with you",
            ));
        }

        self.blob_store.sign(&file.storage_key, self.url_ttl).await
    }

    /// Listing-time variant: a URL when one can be issued, `None`
    /// otherwise. A signing failure degrades that one entry instead of
    /// failing the whole listing.
    pub async fn try_url(&self, file: &File, ctx: &RequestContext) -> Option<String> {
        match self.mediate(file, ctx).await {
            Ok(signed) => Some(signed.url),
            Err(err) => {
                warn!(file_id = %file.id, error = %err, "Could not issue retrieval URL");
                None
            }
        }
    }
}
