//! File repository implementation.

use std::collections::HashSet;

use chrono::Utc;
use dashmap::DashMap;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::{FileId, FolderId, UserId};
use drivebox_entity::file::{CreateFile, File};

/// Repository for file rows: keyed CRUD plus the equality and membership
/// filters the services need.
#[derive(Debug, Default)]
pub struct FileRepository {
    rows: DashMap<FileId, File>,
}

impl FileRepository {
    /// Create an empty file repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a file by ID.
    pub async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        Ok(self.rows.get(&id).map(|row| row.clone()))
    }

    /// Create a new file row and return it.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let now = Utc::now();
        let file = File {
            id: FileId::new(),
            name: data.name.clone(),
            owner_id: data.owner_id,
            folder_id: data.folder_id,
            storage_key: data.storage_key.clone(),
            mime_type: data.mime_type.clone(),
            size_bytes: data.size_bytes,
            is_starred: false,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(file.id, file.clone());
        Ok(file)
    }

    /// Replace an existing file row.
    pub async fn update(&self, file: &File) -> AppResult<File> {
        match self.rows.get_mut(&file.id) {
            Some(mut row) => {
                *row = file.clone();
                Ok(file.clone())
            }
            None => Err(AppError::not_found(format!("File {} not found", file.id))),
        }
    }

    /// Delete a file row. Returns `true` if a row was removed; deleting an
    /// already-absent row is not an error.
    pub async fn delete(&self, id: FileId) -> AppResult<bool> {
        Ok(self.rows.remove(&id).is_some())
    }

    /// Delete a batch of file rows, returning how many actually existed.
    pub async fn delete_many(&self, ids: &[FileId]) -> AppResult<u64> {
        let mut removed = 0u64;
        for id in ids {
            if self.rows.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// List an owner's files in one folder (`None` = root), split by trash
    /// state, ordered by name.
    pub async fn find_by_owner(
        &self,
        owner_id: UserId,
        folder_id: Option<FolderId>,
        deleted: bool,
    ) -> AppResult<Vec<File>> {
        let mut files: Vec<File> = self
            .rows
            .iter()
            .filter(|row| {
                row.owner_id == owner_id && row.folder_id == folder_id && row.is_deleted == deleted
            })
            .map(|row| row.clone())
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// List an owner's starred, live files across all folders.
    pub async fn find_starred_by_owner(&self, owner_id: UserId) -> AppResult<Vec<File>> {
        let mut files: Vec<File> = self
            .rows
            .iter()
            .filter(|row| row.owner_id == owner_id && row.is_starred && !row.is_deleted)
            .map(|row| row.clone())
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// List every trashed file of an owner, regardless of folder.
    pub async fn find_deleted_by_owner(&self, owner_id: UserId) -> AppResult<Vec<File>> {
        let mut files: Vec<File> = self
            .rows
            .iter()
            .filter(|row| row.owner_id == owner_id && row.is_deleted)
            .map(|row| row.clone())
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// List an owner's files whose folder is in the given set, in any trash
    /// state. This is the membership query cascading purges are built on.
    pub async fn find_by_folder_ids(
        &self,
        owner_id: UserId,
        folder_ids: &HashSet<FolderId>,
    ) -> AppResult<Vec<File>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| {
                row.owner_id == owner_id
                    && row
                        .folder_id
                        .map(|id| folder_ids.contains(&id))
                        .unwrap_or(false)
            })
            .map(|row| row.clone())
            .collect())
    }

    /// Case-insensitive substring search over an owner's live files,
    /// capped at `limit` results.
    pub async fn search_by_name(
        &self,
        owner_id: UserId,
        query: &str,
        limit: usize,
    ) -> AppResult<Vec<File>> {
        let needle = query.to_lowercase();
        let mut files: Vec<File> = self
            .rows
            .iter()
            .filter(|row| {
                row.owner_id == owner_id
                    && !row.is_deleted
                    && row.name.to_lowercase().contains(&needle)
            })
            .map(|row| row.clone())
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));
        files.truncate(limit);
        Ok(files)
    }

    /// Count all rows (test support).
    pub async fn count(&self) -> AppResult<u64> {
        Ok(self.rows.len() as u64)
    }
}
