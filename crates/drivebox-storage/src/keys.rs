//! Shared storage-key generation.
//!
//! Key format: `{owner_id}/{uuid}_{filename}`. The random segment keeps two
//! uploads of the same name from ever colliding, and the owner prefix keeps
//! per-user blobs grouped in the underlying store.

use drivebox_core::types::UserId;
use uuid::Uuid;

/// Generate a storage key for a new blob owned by `owner_id`.
pub fn object_key(owner_id: UserId, filename: &str) -> String {
    format!("{}/{}_{}", owner_id, Uuid::new_v4().simple(), filename)
}

/// Mint an opaque bearer token for a signed retrieval URL.
pub(crate) fn mint_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}
