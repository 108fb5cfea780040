//! User Library Use Cases
//!
//! Collections, own submissions and owner status actions.

use std::sync::Arc;

use auth::CurrentUser;
use kernel::id::ResourceId;

use crate::application::browse::load_resource;
use crate::domain::entity::{resource::Resource, transition::StatusTransition};
use crate::domain::repository::CatalogRepository;
use crate::domain::value_object::{audit_status::OwnerAction, resource_kind::ResourceKind};
use crate::error::CatalogResult;

/// Library use case
pub struct LibraryUseCase<R>
where
    R: CatalogRepository,
{
    repo: Arc<R>,
}

impl<R> LibraryUseCase<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Collected resources, most recent first
    pub async fn collection(&self, user: &CurrentUser) -> CatalogResult<Vec<Resource>> {
        self.repo.list_collected(&user.user_id).await
    }

    /// Remove a resource from the collection; returns the remaining ones
    pub async fn uncollect(
        &self,
        user: &CurrentUser,
        kind: ResourceKind,
        resource_id: &ResourceId,
    ) -> CatalogResult<Vec<Resource>> {
        load_resource(self.repo.as_ref(), kind, resource_id).await?;
        self.repo
            .set_collected(resource_id, &user.user_id, false)
            .await?;

        self.collection(user).await
    }

    /// Own submissions, any status, newest first
    pub async fn submissions(&self, user: &CurrentUser) -> CatalogResult<Vec<Resource>> {
        self.repo.list_by_owner(&user.user_id).await
    }

    /// Own submissions with their audit trail
    pub async fn status_records(
        &self,
        user: &CurrentUser,
    ) -> CatalogResult<Vec<(Resource, Vec<StatusTransition>)>> {
        let submissions = self.repo.list_by_owner(&user.user_id).await?;

        let mut records = Vec::with_capacity(submissions.len());
        for resource in submissions {
            let history = self.repo.list_transitions(&resource.resource_id).await?;
            records.push((resource, history));
        }
        Ok(records)
    }

    /// Withdraw or resubmit one's own submission
    pub async fn change_status(
        &self,
        user: &CurrentUser,
        kind: ResourceKind,
        resource_id: &ResourceId,
        action: OwnerAction,
    ) -> CatalogResult<StatusTransition> {
        let mut resource = load_resource(self.repo.as_ref(), kind, resource_id).await?;
        let transition = resource.apply_owner_action(action, user)?;

        self.repo.apply_transition(&resource, &transition).await?;

        tracing::info!(
            resource_id = %resource_id,
            kind = %kind,
            from = %transition.old_status,
            to = %transition.new_status,
            "Owner status action applied"
        );

        Ok(transition)
    }
}
