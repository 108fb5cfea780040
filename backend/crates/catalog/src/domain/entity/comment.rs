//! Comment Entity
//!
//! Comments nest one level: a reply's parent is always a top-level comment
//! of the same resource.

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, ResourceId, UserId};

use crate::error::{CatalogError, CatalogResult};

pub const COMMENT_MAX_LENGTH: usize = 2000;

/// Display fields copied from the author's profile at write time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub nickname: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub comment_id: CommentId,
    pub resource_id: ResourceId,
    pub parent_id: Option<CommentId>,
    pub author_id: UserId,
    pub author: Author,
    pub body: String,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Validated new comment; `parent` must be a top-level comment on `resource_id`
    pub fn new(
        resource_id: ResourceId,
        parent: Option<&Comment>,
        author_id: UserId,
        author: Author,
        body: &str,
    ) -> CatalogResult<Self> {
        let body = body.trim();
        if body.is_empty() {
            return Err(CatalogError::invalid_input("Comment cannot be empty"));
        }
        if body.chars().count() > COMMENT_MAX_LENGTH {
            return Err(CatalogError::invalid_input(format!(
                "Comment must be at most {} characters",
                COMMENT_MAX_LENGTH
            )));
        }

        let parent_id = match parent {
            Some(p) if p.resource_id != resource_id => return Err(CatalogError::CommentNotFound),
            Some(p) if p.is_reply() => return Err(CatalogError::NestedReply),
            Some(p) => Some(p.comment_id),
            None => None,
        };

        Ok(Self {
            comment_id: CommentId::new(),
            resource_id,
            parent_id,
            author_id,
            author,
            body: body.to_owned(),
            like_count: 0,
            created_at: Utc::now(),
        })
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Top-level comment with its replies, oldest reply first
#[derive(Debug, Clone)]
pub struct CommentThread {
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

impl CommentThread {
    /// Group a flat list into threads, newest thread first. Orphaned
    /// replies are dropped.
    pub fn build(mut comments: Vec<Comment>) -> Vec<CommentThread> {
        comments.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.comment_id.cmp(&b.comment_id))
        });

        let (top, replies): (Vec<Comment>, Vec<Comment>) =
            comments.into_iter().partition(|c| !c.is_reply());

        let mut threads: Vec<CommentThread> = top
            .into_iter()
            .map(|comment| CommentThread {
                comment,
                replies: Vec::new(),
            })
            .collect();

        for reply in replies {
            if let Some(thread) = threads
                .iter_mut()
                .find(|t| Some(t.comment.comment_id) == reply.parent_id)
            {
                thread.replies.push(reply);
            }
        }

        threads.reverse();
        threads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn comment(resource_id: ResourceId, parent: Option<&Comment>, body: &str) -> Comment {
        Comment::new(resource_id, parent, UserId::new(), Author::default(), body).unwrap()
    }

    #[test]
    fn test_empty_body_rejected() {
        let err = Comment::new(ResourceId::new(), None, UserId::new(), Author::default(), "  ");
        assert!(matches!(err, Err(CatalogError::InvalidInput { .. })));
    }

    #[test]
    fn test_reply_to_reply_rejected() {
        let resource_id = ResourceId::new();
        let top = comment(resource_id, None, "top");
        let reply = comment(resource_id, Some(&top), "reply");

        let err = Comment::new(
            resource_id,
            Some(&reply),
            UserId::new(),
            Author::default(),
            "nested",
        );
        assert!(matches!(err, Err(CatalogError::NestedReply)));
    }

    #[test]
    fn test_parent_on_other_resource() {
        let top = comment(ResourceId::new(), None, "top");
        let err = Comment::new(
            ResourceId::new(),
            Some(&top),
            UserId::new(),
            Author::default(),
            "reply",
        );
        assert!(matches!(err, Err(CatalogError::CommentNotFound)));
    }

    #[test]
    fn test_build_threads() {
        let resource_id = ResourceId::new();
        let mut first = comment(resource_id, None, "first");
        first.created_at -= Duration::minutes(10);
        let second = comment(resource_id, None, "second");
        let mut late_reply = comment(resource_id, Some(&first), "late");
        late_reply.created_at += Duration::minutes(5);
        let early_reply = comment(resource_id, Some(&first), "early");

        let threads = CommentThread::build(vec![late_reply, second, early_reply, first]);

        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].comment.body, "second");
        assert_eq!(threads[1].comment.body, "first");
        let bodies: Vec<_> = threads[1].replies.iter().map(|r| r.body.as_str()).collect();
        assert_eq!(bodies, vec!["early", "late"]);
    }
}
