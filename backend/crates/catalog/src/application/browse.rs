//! Browse Use Cases
//!
//! Listing, keyword search and detail pages for the three families.

use std::collections::HashMap;
use std::sync::Arc;

use auth::CurrentUser;
use kernel::id::ResourceId;

use crate::domain::entity::{comment::CommentThread, resource::Resource};
use crate::domain::repository::{CatalogRepository, ViewerFlags};
use crate::domain::value_object::{
    listing::{PageRequest, ResourceFilter, ResourcePage, ResourceQuery, SortKey},
    resource_kind::ResourceKind,
};
use crate::error::{CatalogError, CatalogResult};

/// Load a resource of `kind`; a family mismatch is reported as not found
pub(crate) async fn load_resource<R>(
    repo: &R,
    kind: ResourceKind,
    resource_id: &ResourceId,
) -> CatalogResult<Resource>
where
    R: CatalogRepository,
{
    repo.find_resource(resource_id)
        .await?
        .filter(|r| r.kind() == kind)
        .ok_or(CatalogError::ResourceNotFound(kind))
}

/// Load a resource `viewer` is allowed to see
pub(crate) async fn load_visible<R>(
    repo: &R,
    kind: ResourceKind,
    resource_id: &ResourceId,
    viewer: Option<&CurrentUser>,
) -> CatalogResult<Resource>
where
    R: CatalogRepository,
{
    let resource = load_resource(repo, kind, resource_id).await?;
    if resource.visible_to(viewer) {
        Ok(resource)
    } else {
        Err(CatalogError::ResourceNotFound(kind))
    }
}

/// Load an approved resource; engagement is only accepted on these
pub(crate) async fn load_public<R>(
    repo: &R,
    kind: ResourceKind,
    resource_id: &ResourceId,
) -> CatalogResult<Resource>
where
    R: CatalogRepository,
{
    load_visible(repo, kind, resource_id, None).await
}

/// List input
#[derive(Debug, Clone, Default)]
pub struct ListInput {
    pub filter: ResourceFilter,
    pub sort: SortKey,
    pub page: PageRequest,
}

/// One listing page with per-resource comment counts
#[derive(Debug, Clone, Default)]
pub struct ResourceListing {
    pub items: Vec<Resource>,
    pub total: u64,
    comment_counts: HashMap<ResourceId, i64>,
}

impl ResourceListing {
    pub fn comment_count(&self, resource_id: &ResourceId) -> i64 {
        self.comment_counts.get(resource_id).copied().unwrap_or(0)
    }
}

/// List / search use case; only approved resources are returned
pub struct ListResourcesUseCase<R>
where
    R: CatalogRepository,
{
    repo: Arc<R>,
}

impl<R> ListResourcesUseCase<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        kind: ResourceKind,
        input: ListInput,
    ) -> CatalogResult<ResourceListing> {
        let query = ResourceQuery {
            filter: input.filter.normalized(),
            sort: input.sort,
            page: input.page,
            ..ResourceQuery::public(kind)
        };

        let ResourcePage { items, total } = self.repo.list_resources(&query).await?;
        let ids: Vec<ResourceId> = items.iter().map(|r| r.resource_id).collect();
        let comment_counts = if ids.is_empty() {
            HashMap::new()
        } else {
            self.repo.count_comments(&ids).await?
        };

        Ok(ResourceListing {
            items,
            total,
            comment_counts,
        })
    }

    /// Keyword search; a blank keyword is rejected
    pub async fn search(
        &self,
        kind: ResourceKind,
        keyword: &str,
        page: PageRequest,
    ) -> CatalogResult<ResourceListing> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(CatalogError::InvalidInput {
                message: "Keyword cannot be empty".to_owned(),
                action: Some("Provide `keyword` in the query string".to_owned()),
            });
        }

        self.execute(
            kind,
            ListInput {
                filter: ResourceFilter {
                    keyword: Some(keyword.to_owned()),
                    ..Default::default()
                },
                sort: SortKey::Latest,
                page,
            },
        )
        .await
    }
}

/// Detail page: the resource, viewer flags and comment threads
#[derive(Debug, Clone)]
pub struct ResourceDetail {
    pub resource: Resource,
    pub flags: ViewerFlags,
    pub comment_count: i64,
    pub threads: Vec<CommentThread>,
}

/// Get detail use case
pub struct GetResourceUseCase<R>
where
    R: CatalogRepository,
{
    repo: Arc<R>,
}

impl<R> GetResourceUseCase<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        kind: ResourceKind,
        resource_id: &ResourceId,
        viewer: Option<&CurrentUser>,
    ) -> CatalogResult<ResourceDetail> {
        let resource = load_visible(self.repo.as_ref(), kind, resource_id, viewer).await?;

        let flags = match viewer {
            Some(user) => self.repo.viewer_flags(resource_id, &user.user_id).await?,
            None => ViewerFlags::default(),
        };

        let comments = self.repo.list_comments(resource_id).await?;
        let comment_count = comments.len() as i64;

        Ok(ResourceDetail {
            resource,
            flags,
            comment_count,
            threads: CommentThread::build(comments),
        })
    }
}
