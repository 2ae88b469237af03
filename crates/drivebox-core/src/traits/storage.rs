//! Blob store trait for pluggable object storage backends.
//!
//! The blob store is an external collaborator: it holds opaque blobs under
//! string keys and knows nothing about folders, owners, or sharing. The
//! [`BlobStore`] trait is defined here in `drivebox-core` and implemented
//! in `drivebox-storage`.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::result::AppResult;

/// A signed, time-limited retrieval URL for a stored blob.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SignedUrl {
    /// The retrieval URL.
    pub url: String,
    /// When the URL stops working.
    pub expires_at: DateTime<Utc>,
}

/// Trait for blob storage backends.
///
/// All mutating operations are idempotent where the contract requires it:
/// `remove` succeeds on keys that are already gone, so cascading purges can
/// be retried safely.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "memory", "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store a blob under the given key, replacing any existing blob.
    async fn put(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Remove the blobs under the given keys.
    ///
    /// Keys that do not exist are skipped silently; "already gone" is
    /// success, never an error.
    async fn remove(&self, keys: &[String]) -> AppResult<()>;

    /// Copy the blob at `src` to `dst` within this provider.
    async fn copy(&self, src: &str, dst: &str) -> AppResult<()>;

    /// Issue a signed retrieval URL for the given key, valid for `ttl`.
    async fn sign(&self, key: &str, ttl: Duration) -> AppResult<SignedUrl>;

    /// Check whether a blob exists under the given key.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}
