//! Admin Use Cases
//!
//! Moderation queue and review decisions.

use std::sync::Arc;

use auth::CurrentUser;
use kernel::id::ResourceId;

use crate::domain::entity::{resource::Resource, transition::StatusTransition};
use crate::domain::repository::CatalogRepository;
use crate::domain::value_object::{
    audit_status::{AuditStatus, ReviewAction},
    listing::{PageRequest, ResourceFilter, ResourceQuery, SortKey},
    resource_kind::{ResourceKind, ReviewQueue},
};
use crate::error::{CatalogError, CatalogResult};

/// Reference to a reviewable item: `<family>:<uuid>` or a bare uuid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRef {
    pub kind: Option<ResourceKind>,
    pub resource_id: ResourceId,
}

impl ItemRef {
    pub fn parse(raw: &str) -> CatalogResult<Self> {
        let raw = raw.trim();
        let (kind, id) = match raw.split_once(':') {
            Some((prefix, id)) => {
                let kind = ResourceKind::parse(prefix).ok_or_else(|| CatalogError::InvalidInput {
                    message: format!("Unknown item type: {prefix}"),
                    action: Some("Use tool:<id>, course:<id> or project:<id>".to_owned()),
                })?;
                (Some(kind), id)
            }
            None => (None, raw),
        };

        let resource_id = ResourceId::parse_str(id)?;
        Ok(Self { kind, resource_id })
    }
}

/// Pending queue page
#[derive(Debug, Clone, Default)]
pub struct PendingPage {
    pub total: u64,
    /// Next cursor, or the requested one when the queue is exhausted
    pub cursor: u64,
    pub items: Vec<Resource>,
}

/// Get pending use case
pub struct GetPendingUseCase<R>
where
    R: CatalogRepository,
{
    repo: Arc<R>,
}

impl<R> GetPendingUseCase<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Unknown item types and the comment queue yield an empty page
    pub async fn execute(
        &self,
        item_type: &str,
        page: PageRequest,
        sort: Option<&str>,
    ) -> CatalogResult<PendingPage> {
        let empty = PendingPage {
            cursor: page.offset as u64,
            ..Default::default()
        };

        let kind = match ReviewQueue::parse(item_type) {
            Some(ReviewQueue::Resources(kind)) => kind,
            Some(ReviewQueue::Comments) => return Ok(empty),
            None => {
                tracing::debug!(item_type, "Unknown review queue");
                return Ok(empty);
            }
        };

        let sort = match SortKey::parse(sort) {
            SortKey::Oldest => SortKey::Oldest,
            _ => SortKey::Latest,
        };

        let result = self
            .repo
            .list_resources(&ResourceQuery {
                kind,
                status: AuditStatus::Pending,
                filter: ResourceFilter::default(),
                sort,
                page,
            })
            .await?;

        Ok(PendingPage {
            total: result.total,
            cursor: page.next_cursor(result.total).unwrap_or(page.offset as u64),
            items: result.items,
        })
    }
}

/// Review input
#[derive(Debug, Clone)]
pub struct ReviewInput {
    pub item_id: String,
    pub action: String,
    pub reject_reason: Option<String>,
}

/// Review item use case
pub struct ReviewItemUseCase<R>
where
    R: CatalogRepository,
{
    repo: Arc<R>,
}

impl<R> ReviewItemUseCase<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        admin: &CurrentUser,
        input: ReviewInput,
    ) -> CatalogResult<StatusTransition> {
        let item = ItemRef::parse(&input.item_id)?;
        let action = ReviewAction::parse(&input.action).ok_or_else(|| CatalogError::InvalidInput {
            message: format!("Unknown review action: {}", input.action.trim()),
            action: Some("Use approve or reject".to_owned()),
        })?;

        let mut resource = self
            .repo
            .find_resource(&item.resource_id)
            .await?
            .ok_or(match item.kind {
                Some(kind) => CatalogError::ResourceNotFound(kind),
                None => CatalogError::ItemNotFound,
            })?;
        match item.kind {
            Some(kind) if kind != resource.kind() => {
                return Err(CatalogError::ResourceNotFound(kind));
            }
            _ => {}
        }

        let transition = resource.review(action, input.reject_reason, &admin.user_name)?;
        self.repo.apply_transition(&resource, &transition).await?;

        tracing::info!(
            resource_id = %resource.resource_id,
            kind = %resource.kind(),
            status = %transition.new_status,
            operator = %admin.user_name,
            "Review applied"
        );

        Ok(transition)
    }
}
