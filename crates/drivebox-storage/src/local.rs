//! Local filesystem blob store provider.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::fs;
use tracing::debug;

use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_core::traits::storage::{BlobStore, SignedUrl};

use crate::keys::mint_token;

/// A token issued by [`LocalBlobStore::sign`].
#[derive(Debug, Clone)]
struct IssuedToken {
    #[allow(dead_code)]
    key: String,
    expires_at: DateTime<Utc>,
}

/// Blob store rooted in a local directory. Storage keys map to relative
/// paths under the root.
#[derive(Debug)]
pub struct LocalBlobStore {
    root: PathBuf,
    base_url: String,
    tokens: DashMap<String, IssuedToken>,
}

impl LocalBlobStore {
    /// Create a local blob store rooted at the given path, creating the
    /// directory if needed.
    pub async fn new(root_path: &str, base_url: impl Into<String>) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::UpstreamStorage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            base_url: base_url.into(),
            tokens: DashMap::new(),
        })
    }

    /// Resolve a storage key to an absolute path within the root.
    fn resolve(&self, key: &str) -> PathBuf {
        let clean = key.trim_start_matches('/');
        self.root.join(clean)
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::UpstreamStorage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    /// Whether a previously issued token is still valid (test support).
    pub fn token_is_valid(&self, token: &str) -> bool {
        self.tokens
            .get(token)
            .map(|issued| issued.expires_at > Utc::now())
            .unwrap_or(false)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(key);
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::UpstreamStorage,
                format!("Failed to write blob: {key}"),
                e,
            )
        })?;

        debug!(key, bytes = data.len(), "Wrote blob");
        Ok(())
    }

    async fn remove(&self, keys: &[String]) -> AppResult<()> {
        for key in keys {
            let full_path = self.resolve(key);
            // Absent keys are skipped; "already gone" is success.
            if full_path.exists() {
                fs::remove_file(&full_path).await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::UpstreamStorage,
                        format!("Failed to delete blob: {key}"),
                        e,
                    )
                })?;
            }
        }
        debug!(count = keys.len(), "Removed blobs");
        Ok(())
    }

    async fn copy(&self, src: &str, dst: &str) -> AppResult<()> {
        let from_path = self.resolve(src);
        let to_path = self.resolve(dst);
        self.ensure_parent(&to_path).await?;

        fs::copy(&from_path, &to_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::UpstreamStorage,
                format!("Failed to copy {src} -> {dst}"),
                e,
            )
        })?;
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
        Ok(self.resolve(key).exists())
    }
}
