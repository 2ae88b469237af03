//! Share grant repository implementation.

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::ShareId;
use drivebox_entity::share::{CreateShare, ShareGrant};

/// Repository for share grants, enforcing the one-grant-per
/// `(resource, grantee)` uniqueness invariant.
#[derive(Debug, Default)]
pub struct ShareRepository {
    rows: DashMap<ShareId, ShareGrant>,
}

impl ShareRepository {
    /// Create an empty share repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a grant by ID.
    pub async fn find_by_id(&self, id: ShareId) -> AppResult<Option<ShareGrant>> {
        Ok(self.rows.get(&id).map(|row| row.clone()))
    }

    /// Create a new grant.
    ///
    /// Fails with `Conflict` when a grant for the same
    /// `(resource_id, grantee_email)` pair already exists — a second invite
    /// is a conflict, not an overwrite. The existence check and the insert
    /// are not one atomic step; like the rest of this in-process store,
    /// per-row operations are the only consistency unit.
    pub async fn create(&self, data: &CreateShare) -> AppResult<ShareGrant> {
        let duplicate = self.rows.iter().any(|row| {
            row.resource_id == data.resource_id && row.grantee_email == data.grantee_email
        });
        if duplicate {
            return Err(AppError::conflict(format!(
                "'{}' already has access to this resource",
                data.grantee_email
            )));
        }

        let grant = ShareGrant {
            id: ShareId::new(),
            resource_id: data.resource_id,
            resource_type: data.resource_type,
            grantee_email: data.grantee_email.clone(),
            role: data.role,
            owner_id: data.owner_id,
            created_at: Utc::now(),
        };
        self.rows.insert(grant.id, grant.clone());
        Ok(grant)
    }

    /// Replace an existing grant (role changes).
    pub async fn update(&self, grant: &ShareGrant) -> AppResult<ShareGrant> {
        match self.rows.get_mut(&grant.id) {
            Some(mut row) => {
                *row = grant.clone();
                Ok(grant.clone())
            }
            None => Err(AppError::not_found(format!("Share {} not found", grant.id))),
        }
    }

    /// Delete a grant. Returns `true` if a row was removed.
    pub async fn delete(&self, id: ShareId) -> AppResult<bool> {
        Ok(self.rows.remove(&id).is_some())
    }

    /// List every grant on one resource, oldest first.
    pub async fn find_by_resource(&self, resource_id: Uuid) -> AppResult<Vec<ShareGrant>> {
        let mut grants: Vec<ShareGrant> = self
            .rows
            .iter()
            .filter(|row| row.resource_id == resource_id)
            .map(|row| row.clone())
            .collect();
        grants.sort_by_key(|g| g.created_at);
        Ok(grants)
    }

    /// Look up the grant for one `(resource, grantee)` pair.
    pub async fn find_by_resource_and_email(
        &self,
        resource_id: Uuid,
        grantee_email: &str,
    ) -> AppResult<Option<ShareGrant>> {
        Ok(self
            .rows
            .iter()
            .find(|row| row.resource_id == resource_id && row.grantee_email == grantee_email)
            .map(|row| row.clone()))
    }

    /// List every grant issued to one grantee e-mail, oldest first.
    pub async fn find_by_grantee_email(&self, grantee_email: &str) -> AppResult<Vec<ShareGrant>> {
        let mut grants: Vec<ShareGrant> = self
            .rows
            .iter()
            .filter(|row| row.grantee_email == grantee_email)
            .map(|row| row.clone())
            .collect();
        grants.sort_by_key(|g| g.created_at);
        Ok(grants)
    }

    /// Remove every grant whose resource is in the given id set, returning
    /// how many were removed. Called when resources are purged.
    pub async fn delete_by_resource_ids(&self, resource_ids: &[Uuid]) -> AppResult<u64> {
        let doomed: Vec<ShareId> = self
            .rows
            .iter()
            .filter(|row| resource_ids.contains(&row.resource_id))
            .map(|row| row.id)
            .collect();
        let mut removed = 0u64;
        for id in doomed {
            if self.rows.remove(&id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Count all rows (test support).
    pub async fn count(&self) -> AppResult<u64> {
        Ok(self.rows.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivebox_core::error::ErrorKind;
    use drivebox_core::types::UserId;
    use drivebox_entity::resource::ResourceType;
    use drivebox_entity::share::ShareRole;

    fn invite(resource_id: Uuid, email: &str, owner: UserId) -> CreateShare {
        CreateShare {
            resource_id,
            resource_type: ResourceType::File,
            grantee_email: email.to_string(),
            role: ShareRole::Viewer,
            owner_id: owner,
        }
    }

    #[tokio::test]
    async fn test_duplicate_invite_conflicts() {
        let repo = ShareRepository::new();
        let resource = Uuid::new_v4();
        let owner = UserId::new();

        repo.create(&invite(resource, "bob@example.com", owner))
            .await
            .unwrap();
        let err = repo
            .create(&invite(resource, "bob@example.com", owner))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let grants = repo.find_by_resource(resource).await.unwrap();
        assert_eq!(grants.len(), 1);
    }

    #[tokio::test]
    async fn test_same_email_different_resources_ok() {
        let repo = ShareRepository::new();
        let owner = UserId::new();
        repo.create(&invite(Uuid::new_v4(), "bob@example.com", owner))
            .await
            .unwrap();
        repo.create(&invite(Uuid::new_v4(), "bob@example.com", owner))
            .await
            .unwrap();
        let grants = repo.find_by_grantee_email("bob@example.com").await.unwrap();
        assert_eq!(grants.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_by_resource_ids() {
        let repo = ShareRepository::new();
        let owner = UserId::new();
        let purged = Uuid::new_v4();
        let kept = Uuid::new_v4();
        repo.create(&invite(purged, "a@example.com", owner)).await.unwrap();
        repo.create(&invite(purged, "b@example.com", owner)).await.unwrap();
        repo.create(&invite(kept, "a@example.com", owner)).await.unwrap();

        let removed = repo.delete_by_resource_ids(&[purged]).await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
