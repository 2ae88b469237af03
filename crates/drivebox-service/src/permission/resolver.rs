//! Resolves an actor's capability role on a resource.
//!
//! Ownership wins outright; otherwise the share registry decides. Every
//! mutating operation routes through the gates here before touching the
//! store.

use std::sync::Arc;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_database::repositories::ShareRepository;
use drivebox_entity::permission::Role;
use drivebox_entity::resource::Resource;

use crate::context::RequestContext;

/// Combines ownership with the share registry to produce a capability
/// role. Pure reads, no side effects.
#[derive(Debug, Clone)]
pub struct PermissionResolver {
    /// Share repository.
    share_repo: Arc<ShareRepository>,
}

impl PermissionResolver {
    /// Creates a new permission resolver.
    pub fn new(share_repo: Arc<ShareRepository>) -> Self {
        Self { share_repo }
    }

    /// Resolve the actor's explicitly granted role, if any.
    ///
    /// `Some(Owner)` for the resource owner — regardless of any grant that
    /// may exist for the same e-mail. Otherwise the grant role for
    /// `(resource, actor e-mail)`, or `None` when the actor has no
    /// relationship to the resource at all.
    pub async fn resolve_explicit(
        &self,
        resource: &Resource,
        ctx: &RequestContext,
    ) -> AppResult<Option<Role>> {
        if resource.owner_id() == ctx.user_id {
            return Ok(Some(Role::Owner));
        }

        let grant = self
            .share_repo
            .find_by_resource_and_email(resource.id(), &ctx.email)
            .await?;
        Ok(grant.map(|g| Role::from(g.role)))
    }

    /// Resolve the actor's role, defaulting to `Viewer`.
    ///
    /// The default is the *strictest* role, never an absence: missing
    /// information must not widen capability. Callers that need to block
    /// all access (e.g. mediated URLs) gate on [`Self::resolve_explicit`]
    /// instead of relying on a denial role.
    pub async fn resolve(&self, resource: &Resource, ctx: &RequestContext) -> AppResult<Role> {
        Ok(self
            .resolve_explicit(resource, ctx)
            .await?
            .unwrap_or(Role::Viewer))
    }

    /// Require a role that permits mutation (Owner or Editor).
    pub async fn require_mutate(
        &self,
        resource: &Resource,
        ctx: &RequestContext,
    ) -> AppResult<Role> {
        let role = self.resolve(resource, ctx).await?;
        if !role.can_mutate() {
            return Err(AppError::access_denied(format!(
                "A {role} cannot modify this {}",
                resource.resource_type()
            )));
        }
        Ok(role)
    }

    /// Require ownership.
    pub fn require_owner(&self, resource: &Resource, ctx: &RequestContext) -> AppResult<()> {
        if resource.owner_id() != ctx.user_id {
            return Err(AppError::access_denied(format!(
                "Only the owner can perform this operation on a {}",
                resource.resource_type()
            )));
        }
        Ok(())
    }
}
