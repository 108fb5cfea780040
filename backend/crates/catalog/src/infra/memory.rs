//! In-Memory Repository Implementation
//!
//! Used by tests and by the server when no database is configured. All
//! state sits behind one lock so counter updates and flag rows change
//! together.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use auth::{InMemoryUserRepository, UserRepository};
use kernel::id::{CommentId, ResourceId, UserId};
use tokio::sync::RwLock;

use crate::domain::entity::{
    comment::{Author, Comment},
    resource::{Material, Resource, ResourceDetails},
    transition::StatusTransition,
};
use crate::domain::repository::{
    AuthorDirectory, CommentRepository, EngagementRepository, EngagementState, ResourceRepository,
    ReviewRepository, ViewerFlags,
};
use crate::domain::value_object::listing::{ResourcePage, ResourceQuery};
use crate::error::{CatalogError, CatalogResult};

#[derive(Default)]
struct Store {
    resources: HashMap<ResourceId, Resource>,
    likes: HashSet<(ResourceId, UserId)>,
    /// Collection rows in insertion order
    collections: Vec<(ResourceId, UserId)>,
    comments: HashMap<CommentId, Comment>,
    transitions: Vec<StatusTransition>,
}

impl Store {
    /// Flag rows must never point at a missing resource
    fn ensure_resource(&mut self, resource_id: &ResourceId) -> CatalogResult<&mut Resource> {
        self.resources
            .get_mut(resource_id)
            .ok_or_else(|| CatalogError::Internal(format!("resource {resource_id} does not exist")))
    }
}

/// In-memory catalog store; clones share the same state
#[derive(Clone, Default)]
pub struct InMemoryCatalogRepository {
    store: Arc<RwLock<Store>>,
    users: InMemoryUserRepository,
}

impl InMemoryCatalogRepository {
    /// Comment authors are resolved through `users`
    pub fn new(users: InMemoryUserRepository) -> Self {
        Self {
            store: Arc::default(),
            users,
        }
    }
}

// ============================================================================
// Resources
// ============================================================================

impl ResourceRepository for InMemoryCatalogRepository {
    async fn create_resource(&self, resource: &Resource) -> CatalogResult<()> {
        let mut store = self.store.write().await;
        store
            .resources
            .insert(resource.resource_id, resource.clone());
        Ok(())
    }

    async fn find_resource(&self, resource_id: &ResourceId) -> CatalogResult<Option<Resource>> {
        Ok(self.store.read().await.resources.get(resource_id).cloned())
    }

    async fn update_resource(&self, resource: &Resource) -> CatalogResult<()> {
        let mut store = self.store.write().await;
        let stored = store
            .resources
            .get_mut(&resource.resource_id)
            .ok_or(CatalogError::ResourceNotFound(resource.kind()))?;

        let (stats, audit) = (stored.stats, stored.audit.clone());
        *stored = resource.clone();
        stored.stats = stats;
        stored.audit = audit;
        Ok(())
    }

    async fn append_material(
        &self,
        course_id: &ResourceId,
        material: &Material,
    ) -> CatalogResult<bool> {
        let mut store = self.store.write().await;
        let Some(course) = store.resources.get_mut(course_id) else {
            return Ok(false);
        };
        let ResourceDetails::Course(details) = &mut course.details else {
            return Ok(false);
        };

        details.materials.push(material.clone());
        course.add_contributor(&material.uploader);
        course.updated_at = material.uploaded_at;
        Ok(true)
    }

    async fn list_resources(&self, query: &ResourceQuery) -> CatalogResult<ResourcePage> {
        let store = self.store.read().await;

        let mut matched: Vec<&Resource> = store
            .resources
            .values()
            .filter(|r| r.kind() == query.kind && r.audit.status == query.status)
            .filter(|r| query.filter.matches(r))
            .collect();
        matched.sort_by(|a, b| query.sort.compare(a, b));

        Ok(ResourcePage {
            total: matched.len() as u64,
            items: matched
                .into_iter()
                .skip(query.page.offset)
                .take(query.page.limit)
                .cloned()
                .collect(),
        })
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> CatalogResult<Vec<Resource>> {
        let store = self.store.read().await;

        let mut owned: Vec<Resource> = store
            .resources
            .values()
            .filter(|r| r.is_owned_by(owner_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.resource_id.cmp(&b.resource_id))
        });
        Ok(owned)
    }

    async fn increment_views(&self, resource_id: &ResourceId) -> CatalogResult<Option<i64>> {
        let mut store = self.store.write().await;
        Ok(store.resources.get_mut(resource_id).map(|r| {
            r.stats.views += 1;
            r.stats.views
        }))
    }
}

// ============================================================================
// Likes and collections
// ============================================================================

impl EngagementRepository for InMemoryCatalogRepository {
    async fn set_liked(
        &self,
        resource_id: &ResourceId,
        user_id: &UserId,
        liked: bool,
    ) -> CatalogResult<EngagementState> {
        let mut store = self.store.write().await;
        store.ensure_resource(resource_id)?;
        let key = (*resource_id, *user_id);

        let changed = if liked {
            store.likes.insert(key)
        } else {
            store.likes.remove(&key)
        };

        let resource = store.ensure_resource(resource_id)?;
        if changed {
            resource.stats.likes = (resource.stats.likes + if liked { 1 } else { -1 }).max(0);
        }

        Ok(EngagementState {
            active: liked,
            count: resource.stats.likes,
        })
    }

    async fn set_collected(
        &self,
        resource_id: &ResourceId,
        user_id: &UserId,
        collected: bool,
    ) -> CatalogResult<EngagementState> {
        let mut store = self.store.write().await;
        store.ensure_resource(resource_id)?;
        let key = (*resource_id, *user_id);

        let present = store.collections.contains(&key);
        let changed = match (collected, present) {
            (true, false) => {
                store.collections.push(key);
                true
            }
            (false, true) => {
                store.collections.retain(|row| row != &key);
                true
            }
            _ => false,
        };

        let resource = store.ensure_resource(resource_id)?;
        if changed {
            resource.stats.collections =
                (resource.stats.collections + if collected { 1 } else { -1 }).max(0);
        }

        Ok(EngagementState {
            active: collected,
            count: resource.stats.collections,
        })
    }

    async fn viewer_flags(
        &self,
        resource_id: &ResourceId,
        user_id: &UserId,
    ) -> CatalogResult<ViewerFlags> {
        let store = self.store.read().await;
        let key = (*resource_id, *user_id);

        Ok(ViewerFlags {
            liked: store.likes.contains(&key),
            collected: store.collections.contains(&key),
        })
    }

    async fn list_collected(&self, user_id: &UserId) -> CatalogResult<Vec<Resource>> {
        let store = self.store.read().await;

        Ok(store
            .collections
            .iter()
            .rev()
            .filter(|(_, uid)| uid == user_id)
            .filter_map(|(rid, _)| store.resources.get(rid).cloned())
            .collect())
    }
}

// ============================================================================
// Comments
// ============================================================================

impl CommentRepository for InMemoryCatalogRepository {
    async fn create_comment(&self, comment: &Comment) -> CatalogResult<()> {
        let mut store = self.store.write().await;
        store.comments.insert(comment.comment_id, comment.clone());
        Ok(())
    }

    async fn find_comment(&self, comment_id: &CommentId) -> CatalogResult<Option<Comment>> {
        Ok(self.store.read().await.comments.get(comment_id).cloned())
    }

    async fn list_comments(&self, resource_id: &ResourceId) -> CatalogResult<Vec<Comment>> {
        let store = self.store.read().await;
        Ok(store
            .comments
            .values()
            .filter(|c| &c.resource_id == resource_id)
            .cloned()
            .collect())
    }

    async fn count_comments(
        &self,
        resource_ids: &[ResourceId],
    ) -> CatalogResult<HashMap<ResourceId, i64>> {
        let store = self.store.read().await;
        let mut counts = HashMap::new();
        for comment in store.comments.values() {
            if resource_ids.contains(&comment.resource_id) {
                *counts.entry(comment.resource_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn delete_comment(&self, comment_id: &CommentId) -> CatalogResult<u64> {
        let mut store = self.store.write().await;
        let before = store.comments.len();

        store
            .comments
            .retain(|id, c| id != comment_id && c.parent_id.as_ref() != Some(comment_id));

        Ok((before - store.comments.len()) as u64)
    }
}

// ============================================================================
// Audit trail
// ============================================================================

impl ReviewRepository for InMemoryCatalogRepository {
    async fn apply_transition(
        &self,
        resource: &Resource,
        transition: &StatusTransition,
    ) -> CatalogResult<()> {
        let mut store = self.store.write().await;
        let stored = store
            .resources
            .get_mut(&resource.resource_id)
            .ok_or(CatalogError::ResourceNotFound(resource.kind()))?;
        if stored.audit.status != transition.old_status {
            return Err(transition.conflict(stored.audit.status));
        }

        stored.audit = resource.audit.clone();
        stored.updated_at = resource.updated_at;
        store.transitions.push(transition.clone());
        Ok(())
    }

    async fn list_transitions(
        &self,
        resource_id: &ResourceId,
    ) -> CatalogResult<Vec<StatusTransition>> {
        let store = self.store.read().await;
        Ok(store
            .transitions
            .iter()
            .filter(|t| &t.resource_id == resource_id)
            .cloned()
            .collect())
    }
}

impl AuthorDirectory for InMemoryCatalogRepository {
    async fn find_author(&self, user_id: &UserId) -> CatalogResult<Option<Author>> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| CatalogError::Internal(e.to_string()))?;

        Ok(user.map(|u| Author {
            nickname: u.nickname,
            avatar: u.avatar,
        }))
    }
}
