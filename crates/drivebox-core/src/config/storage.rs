//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Blob store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Blob store provider: `"memory"` or `"local"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Root path for the local filesystem provider.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Base URL signed retrieval URLs are issued under.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Lifetime of signed retrieval URLs in seconds.
    #[serde(default = "default_signed_url_ttl")]
    pub signed_url_ttl_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            root_path: default_root_path(),
            public_base_url: default_public_base_url(),
            signed_url_ttl_seconds: default_signed_url_ttl(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_root_path() -> String {
    "./data/blobs".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_signed_url_ttl() -> u64 {
    3600
}
