//! In-memory blob store provider.
//!
//! Backs tests and development runs. Blobs live in a concurrent map; signed
//! URLs are minted as opaque bearer tokens recorded provider-side, the way
//! a real object store tracks its signatures.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::storage::{BlobStore, SignedUrl};

use crate::keys::mint_token;

/// A token issued by [`MemoryBlobStore::sign`].
#[derive(Debug, Clone)]
struct IssuedToken {
    key: String,
    expires_at: DateTime<Utc>,
}

/// In-memory blob store.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, Bytes>,
    tokens: DashMap<String, IssuedToken>,
    base_url: String,
}

impl MemoryBlobStore {
    /// Create an empty in-memory store issuing URLs under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            blobs: DashMap::new(),
            tokens: DashMap::new(),
            base_url: base_url.into(),
        }
    }

    /// Number of blobs currently stored.
    pub fn blob_count(&self) -> usize {
        self.blobs.len()
    }

    /// Whether a blob exists under the given key (sync test support).
    pub fn contains(&self, key: &str) -> bool {
        self.blobs.contains_key(key)
    }

    /// The store's download side: exchange a signed token for the blob
    /// bytes. Unknown and expired tokens are rejected.
    pub fn redeem(&self, token: &str) -> AppResult<Bytes> {
        let issued = self
            .tokens
            .get(token)
            .ok_or_else(|| AppError::access_denied("Signed URL is invalid"))?;
        if issued.expires_at <= Utc::now() {
            return Err(AppError::access_denied("Signed URL has expired"));
        }
        self.blobs
            .get(&issued.key)
            .map(|blob| blob.clone())
            .ok_or_else(|| AppError::upstream_storage(format!("No blob under key {}", issued.key)))
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        debug!(key, bytes = data.len(), "Stored blob");
        self.blobs.insert(key.to_string(), data);
        Ok(())
    }

    async fn remove(&self, keys: &[String]) -> AppResult<()> {
        for key in keys {
            // Absent keys are skipped; "already gone" is success.
            self.blobs.remove(key);
        }
        debug!(count = keys.len(), "Removed blobs");
        Ok(())
    }

    async fn copy(&self, src: &str, dst: &str) -> AppResult<()> {
        let data = self
            .blobs
            .get(src)
            .map(|blob| blob.clone())
            .ok_or_else(|| AppError::upstream_storage(format!("No blob under key {src}")))?;
        self.blobs.insert(dst.to_string(), data);
        Ok(())
    }

    async fn sign(&self, key: &str, ttl: Duration) -> AppResult<SignedUrl> {
        let token = mint_token();
        let expires_at = Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| AppError::internal(format!("TTL out of range: {e}")))?;
        self.tokens.insert(
            token.clone(),
            IssuedToken {
                key: key.to_string(),
                expires_at,
            },
        );
        Ok(SignedUrl {
            url: format!("{}/blob/{key}?token={token}", self.base_url),
            expires_at,
        })
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.blobs.contains_key(key))
    }
}
