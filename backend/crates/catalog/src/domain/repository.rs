//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use std::collections::HashMap;

use kernel::id::{CommentId, ResourceId, UserId};

use crate::domain::entity::{
    comment::{Author, Comment},
    resource::{Material, Resource},
    transition::StatusTransition,
};
use crate::domain::value_object::listing::{ResourcePage, ResourceQuery};
use crate::error::CatalogResult;

/// Per-user engagement flag and the resulting counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementState {
    pub active: bool,
    pub count: i64,
}

/// Viewer-relative flags; both `false` for anonymous viewers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerFlags {
    pub liked: bool,
    pub collected: bool,
}

/// Resource store, shared by the three families
#[trait_variant::make(ResourceRepository: Send)]
pub trait LocalResourceRepository {
    async fn create_resource(&self, resource: &Resource) -> CatalogResult<()>;

    async fn find_resource(&self, resource_id: &ResourceId) -> CatalogResult<Option<Resource>>;

    /// Persist content, details and contributors.
    ///
    /// Counters and audit state are left untouched; they belong to the
    /// engagement actions and [`ReviewRepository::apply_transition`].
    async fn update_resource(&self, resource: &Resource) -> CatalogResult<()>;

    /// Append a material to a course and record its uploader as a
    /// contributor, without rewriting the rest of the resource.
    ///
    /// Returns `false` if no course has this id.
    async fn append_material(
        &self,
        course_id: &ResourceId,
        material: &Material,
    ) -> CatalogResult<bool>;

    async fn list_resources(&self, query: &ResourceQuery) -> CatalogResult<ResourcePage>;

    /// Every submission of `owner_id`, any status, newest first
    async fn list_by_owner(&self, owner_id: &UserId) -> CatalogResult<Vec<Resource>>;

    /// Returns the new view count, `None` if the resource does not exist
    async fn increment_views(&self, resource_id: &ResourceId) -> CatalogResult<Option<i64>>;
}

/// Likes and collections, recorded per (resource, user)
#[trait_variant::make(EngagementRepository: Send)]
pub trait LocalEngagementRepository {
    /// Idempotent; the counter follows the number of liking users
    async fn set_liked(
        &self,
        resource_id: &ResourceId,
        user_id: &UserId,
        liked: bool,
    ) -> CatalogResult<EngagementState>;

    /// Idempotent; the counter follows the number of collecting users
    async fn set_collected(
        &self,
        resource_id: &ResourceId,
        user_id: &UserId,
        collected: bool,
    ) -> CatalogResult<EngagementState>;

    async fn viewer_flags(
        &self,
        resource_id: &ResourceId,
        user_id: &UserId,
    ) -> CatalogResult<ViewerFlags>;

    /// Resources collected by `user_id`, most recently collected first
    async fn list_collected(&self, user_id: &UserId) -> CatalogResult<Vec<Resource>>;
}

#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn create_comment(&self, comment: &Comment) -> CatalogResult<()>;

    async fn find_comment(&self, comment_id: &CommentId) -> CatalogResult<Option<Comment>>;

    /// Flat list of comments and replies on a resource
    async fn list_comments(&self, resource_id: &ResourceId) -> CatalogResult<Vec<Comment>>;

    /// Comments and replies per resource; resources without any are absent
    async fn count_comments(
        &self,
        resource_ids: &[ResourceId],
    ) -> CatalogResult<HashMap<ResourceId, i64>>;

    /// Delete a comment and its replies; returns the number of rows removed
    async fn delete_comment(&self, comment_id: &CommentId) -> CatalogResult<u64>;
}

#[trait_variant::make(ReviewRepository: Send)]
pub trait LocalReviewRepository {
    /// Persist the resource's audit state together with the transition record.
    ///
    /// Applies only while the stored status is still `transition.old_status`;
    /// otherwise fails with `InvalidTransition` and nothing is written.
    async fn apply_transition(
        &self,
        resource: &Resource,
        transition: &StatusTransition,
    ) -> CatalogResult<()>;

    /// Audit trail of a resource, oldest first
    async fn list_transitions(&self, resource_id: &ResourceId)
    -> CatalogResult<Vec<StatusTransition>>;
}

/// Read access to user display fields for comment authors
#[trait_variant::make(AuthorDirectory: Send)]
pub trait LocalAuthorDirectory {
    async fn find_author(&self, user_id: &UserId) -> CatalogResult<Option<Author>>;
}

/// Everything the catalog services need from one store
pub trait CatalogRepository:
    ResourceRepository
    + EngagementRepository
    + CommentRepository
    + ReviewRepository
    + AuthorDirectory
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> CatalogRepository for T where
    T: ResourceRepository
        + EngagementRepository
        + CommentRepository
        + ReviewRepository
        + AuthorDirectory
        + Clone
        + Send
        + Sync
        + 'static
{
}
