//! Folder repository implementation.

use std::collections::HashSet;

use chrono::Utc;
use dashmap::DashMap;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::{FolderId, UserId};
use drivebox_entity::folder::{CreateFolder, Folder};

/// Repository for folder rows, including the frontier query tree
/// traversal is built on.
#[derive(Debug, Default)]
pub struct FolderRepository {
    rows: DashMap<FolderId, Folder>,
}

impl FolderRepository {
    /// Create an empty folder repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.rows.get(&id).map(|row| row.clone()))
    }

    /// Create a new folder row and return it.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let now = Utc::now();
        let folder = Folder {
            id: FolderId::new(),
            name: data.name.clone(),
            owner_id: data.owner_id,
            parent_id: data.parent_id,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(folder.id, folder.clone());
        Ok(folder)
    }

    /// Replace an existing folder row.
    pub async fn update(&self, folder: &Folder) -> AppResult<Folder> {
        match self.rows.get_mut(&folder.id) {
            Some(mut row) => {
                *row = folder.clone();
                Ok(folder.clone())
            }
            None => Err(AppError::not_found(format!(
                "Folder {} not found",
                folder.id
            ))),
        }
    }

    /// Delete a folder row. Returns `true` if a row was removed; deleting
    /// an already-absent row is not an error.
    pub async fn delete(&self, id: FolderId) -> AppResult<bool> {
        Ok(self.rows.remove(&id).is_some())
    }

    /// Delete a batch of folder rows, returning how many actually existed.
    pub async fn delete_many(&self, ids: &[FolderId]) -> AppResult<u64> {
        let mut removed = 0u64;
        for id in ids {
            if self.rows.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// List an owner's folders under one parent (`None` = root), split by
    /// trash state, ordered by name.
    pub async fn find_children(
        &self,
        owner_id: UserId,
        parent_id: Option<FolderId>,
        deleted: bool,
    ) -> AppResult<Vec<Folder>> {
        let mut folders: Vec<Folder> = self
            .rows
            .iter()
            .filter(|row| {
                row.owner_id == owner_id && row.parent_id == parent_id && row.is_deleted == deleted
            })
            .map(|row| row.clone())
            .collect();
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(folders)
    }

    /// List an owner's folders whose parent is in the given frontier set,
    /// in any trash state.
    ///
    /// Traversal issues one of these calls per tree level. Trashed
    /// subfolders must be included so purges reach them.
    pub async fn find_by_parent_ids(
        &self,
        owner_id: UserId,
        parent_ids: &HashSet<FolderId>,
    ) -> AppResult<Vec<Folder>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| {
                row.owner_id == owner_id
                    && row
                        .parent_id
                        .map(|id| parent_ids.contains(&id))
                        .unwrap_or(false)
            })
            .map(|row| row.clone())
            .collect())
    }

    /// List every trashed folder of an owner.
    pub async fn find_deleted_by_owner(&self, owner_id: UserId) -> AppResult<Vec<Folder>> {
        let mut folders: Vec<Folder> = self
            .rows
            .iter()
            .filter(|row| row.owner_id == owner_id && row.is_deleted)
            .map(|row| row.clone())
            .collect();
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(folders)
    }

    /// Case-insensitive substring search over an owner's live folders,
    /// capped at `limit` results.
    pub async fn search_by_name(
        &self,
        owner_id: UserId,
        query: &str,
        limit: usize,
    ) -> AppResult<Vec<Folder>> {
        let needle = query.to_lowercase();
        let mut folders: Vec<Folder> = self
            .rows
            .iter()
            .filter(|row| {
                row.owner_id == owner_id
                    && !row.is_deleted
                    && row.name.to_lowercase().contains(&needle)
            })
            .map(|row| row.clone())
            .collect();
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        folders.truncate(limit);
        Ok(folders)
    }

    /// Count all rows (test support).
    pub async fn count(&self) -> AppResult<u64> {
        Ok(self.rows.len() as u64)
    }
}
