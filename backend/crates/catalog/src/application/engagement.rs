//! Engagement Use Cases
//!
//! Views, likes and collections. Only approved resources accept them.

use std::sync::Arc;

use auth::CurrentUser;
use kernel::id::ResourceId;

use crate::application::browse::{load_public, load_resource};
use crate::domain::repository::{CatalogRepository, EngagementState};
use crate::domain::value_object::resource_kind::ResourceKind;
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Collect,
}

/// Engagement use case
pub struct EngagementUseCase<R>
where
    R: CatalogRepository,
{
    repo: Arc<R>,
}

impl<R> EngagementUseCase<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Count a view; returns the new view count
    pub async fn view(&self, kind: ResourceKind, resource_id: &ResourceId) -> CatalogResult<i64> {
        load_public(self.repo.as_ref(), kind, resource_id).await?;

        self.repo
            .increment_views(resource_id)
            .await?
            .ok_or(CatalogError::ResourceNotFound(kind))
    }

    /// Set or clear the caller's like/collect flag. Repeats are no-ops.
    pub async fn react(
        &self,
        user: &CurrentUser,
        kind: ResourceKind,
        resource_id: &ResourceId,
        reaction: Reaction,
        active: bool,
    ) -> CatalogResult<EngagementState> {
        if active {
            load_public(self.repo.as_ref(), kind, resource_id).await?;
        } else {
            // Clearing a flag only needs the resource to exist
            load_resource(self.repo.as_ref(), kind, resource_id).await?;
        }

        let state = match reaction {
            Reaction::Like => self.repo.set_liked(resource_id, &user.user_id, active).await?,
            Reaction::Collect => {
                self.repo
                    .set_collected(resource_id, &user.user_id, active)
                    .await?
            }
        };

        tracing::debug!(
            resource_id = %resource_id,
            user_id = %user.user_id,
            reaction = ?reaction,
            active,
            count = state.count,
            "Engagement recorded"
        );

        Ok(state)
    }
}
