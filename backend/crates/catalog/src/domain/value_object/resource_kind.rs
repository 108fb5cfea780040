//! Resource families and moderation queues

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Resource family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    #[display("tool")]
    Tool,
    #[display("course")]
    Course,
    #[display("project")]
    Project,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Tool, ResourceKind::Course, ResourceKind::Project];

    /// Stable code used in ids, URLs and the `kind` column
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ResourceKind::Tool => "tool",
            ResourceKind::Course => "course",
            ResourceKind::Project => "project",
        }
    }

    /// Capitalized name for messages ("Tool not found")
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            ResourceKind::Tool => "Tool",
            ResourceKind::Course => "Course",
            ResourceKind::Project => "Project",
        }
    }

    /// Accepts codes, plurals and the Chinese family names
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tool" | "tools" | "工具" => Some(ResourceKind::Tool),
            "course" | "courses" | "课程" => Some(ResourceKind::Course),
            "project" | "projects" | "项目" => Some(ResourceKind::Project),
            _ => None,
        }
    }
}

/// Admin moderation queue selected by `GET /admin/pending?type=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewQueue {
    Resources(ResourceKind),
    /// Accepted but has no pending items
    Comments,
}

impl ReviewQueue {
    /// `None` for unknown types
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some(kind) = ResourceKind::parse(raw) {
            return Some(ReviewQueue::Resources(kind));
        }
        match raw.trim().to_ascii_lowercase().as_str() {
            "comment" | "comments" | "评论" => Some(ReviewQueue::Comments),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(ResourceKind::parse("Tool"), Some(ResourceKind::Tool));
        assert_eq!(ResourceKind::parse("课程"), Some(ResourceKind::Course));
        assert_eq!(ResourceKind::parse("projects"), Some(ResourceKind::Project));
        assert_eq!(ResourceKind::parse("book"), None);
    }

    #[test]
    fn test_display_matches_code() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.to_string(), kind.code());
        }
    }

    #[test]
    fn test_review_queue() {
        assert_eq!(
            ReviewQueue::parse("项目"),
            Some(ReviewQueue::Resources(ResourceKind::Project))
        );
        assert_eq!(ReviewQueue::parse("评论"), Some(ReviewQueue::Comments));
        assert_eq!(ReviewQueue::parse("unknown-type"), None);
    }
}
