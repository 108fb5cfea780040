//! Comment Use Cases

use std::sync::Arc;

use auth::CurrentUser;
use kernel::id::{CommentId, ResourceId};

use crate::application::browse::{load_public, load_resource};
use crate::domain::entity::comment::Comment;
use crate::domain::repository::CatalogRepository;
use crate::domain::value_object::resource_kind::ResourceKind;
use crate::error::{CatalogError, CatalogResult};

/// Comment use case
pub struct CommentUseCase<R>
where
    R: CatalogRepository,
{
    repo: Arc<R>,
}

impl<R> CommentUseCase<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Add a top-level comment, or a reply when `parent_id` is set
    pub async fn add(
        &self,
        user: &CurrentUser,
        kind: ResourceKind,
        resource_id: &ResourceId,
        parent_id: Option<&CommentId>,
        body: &str,
    ) -> CatalogResult<Comment> {
        load_public(self.repo.as_ref(), kind, resource_id).await?;

        let parent = match parent_id {
            Some(id) => Some(
                self.repo
                    .find_comment(id)
                    .await?
                    .ok_or(CatalogError::CommentNotFound)?,
            ),
            None => None,
        };

        let author = self
            .repo
            .find_author(&user.user_id)
            .await?
            .ok_or(CatalogError::UserNotFound)?;

        let comment = Comment::new(*resource_id, parent.as_ref(), user.user_id, author, body)?;
        self.repo.create_comment(&comment).await?;

        tracing::info!(
            resource_id = %resource_id,
            comment_id = %comment.comment_id,
            reply = comment.is_reply(),
            "Comment added"
        );

        Ok(comment)
    }

    /// Delete a comment (and its replies). With `parent_id` set, the target
    /// must be a reply under that comment.
    pub async fn delete(
        &self,
        user: &CurrentUser,
        kind: ResourceKind,
        resource_id: &ResourceId,
        comment_id: &CommentId,
        parent_id: Option<&CommentId>,
    ) -> CatalogResult<u64> {
        load_resource(self.repo.as_ref(), kind, resource_id).await?;

        let comment = self
            .repo
            .find_comment(comment_id)
            .await?
            .filter(|c| &c.resource_id == resource_id)
            .filter(|c| parent_id.is_none() || c.parent_id.as_ref() == parent_id)
            .ok_or(CatalogError::CommentNotFound)?;

        if comment.author_id != user.user_id && !user.is_admin() {
            return Err(CatalogError::NotCommentAuthor);
        }

        let removed = self.repo.delete_comment(comment_id).await?;

        tracing::info!(
            resource_id = %resource_id,
            comment_id = %comment_id,
            removed,
            "Comment deleted"
        );

        Ok(removed)
    }
}
