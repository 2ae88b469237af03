//! Breadth-first folder tree traversal.

use std::collections::HashSet;
use std::sync::Arc;

use drivebox_core::result::AppResult;
use drivebox_core::types::{FolderId, UserId};
use drivebox_database::repositories::FolderRepository;

/// Computes the transitive closure of folder descendants.
///
/// The tree lives in the store as parent back-references, so traversal is
/// explicit frontier expansion over the parent index — one store round
/// trip per tree level, no depth bound assumed. This is the only traversal
/// primitive in the system; permanent deletion, trash emptying, and
/// folder-move cycle checks all reuse it.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
}

impl TreeWalker {
    /// Creates a new tree walker.
    pub fn new(folder_repo: Arc<FolderRepository>) -> Self {
        Self { folder_repo }
    }

    /// Return the ids of every proper descendant of the seed folders.
    ///
    /// Seeds themselves are not included. Terminates when a frontier query
    /// comes back empty; the visited set keeps termination guaranteed even
    /// if the acyclicity invariant were violated in the store.
    pub async fn descendant_folder_ids(
        &self,
        owner_id: UserId,
        seed_folder_ids: &[FolderId],
    ) -> AppResult<HashSet<FolderId>> {
        let seeds: HashSet<FolderId> = seed_folder_ids.iter().copied().collect();
        let mut result: HashSet<FolderId> = HashSet::new();
        let mut frontier = seeds.clone();

        while !frontier.is_empty() {
            let children = self
                .folder_repo
                .find_by_parent_ids(owner_id, &frontier)
                .await?;

            let mut next = HashSet::new();
            for child in children {
                if !seeds.contains(&child.id) && result.insert(child.id) {
                    next.insert(child.id);
                }
            }
            frontier = next;
        }

        Ok(result)
    }
}
