//! Listing rules: filters, sort keys and offset pagination
//!
//! The in-memory store evaluates these directly; the PostgreSQL store
//! translates them into SQL with the same semantics.

use std::cmp::Ordering;

use crate::domain::entity::resource::{Resource, ResourceDetails};
use crate::domain::value_object::{audit_status::AuditStatus, resource_kind::ResourceKind};

pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const MAX_PAGE_SIZE: usize = 50;

/// Sort order; every key ties on created desc, then id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Latest,
    Oldest,
    Views,
    Likes,
    Collections,
}

impl SortKey {
    /// Unknown or missing keys fall back to `Latest`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("oldest") => SortKey::Oldest,
            Some("views" | "view" | "hot") => SortKey::Views,
            Some("likes" | "like" | "loves") => SortKey::Likes,
            Some("collections" | "collection" | "collected") => SortKey::Collections,
            _ => SortKey::Latest,
        }
    }

    pub fn compare(&self, a: &Resource, b: &Resource) -> Ordering {
        let primary = match self {
            SortKey::Latest => Ordering::Equal,
            SortKey::Oldest => a.created_at.cmp(&b.created_at),
            SortKey::Views => b.stats.views.cmp(&a.stats.views),
            SortKey::Likes => b.stats.likes.cmp(&a.stats.likes),
            SortKey::Collections => b.stats.collections.cmp(&a.stats.collections),
        };

        primary
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.resource_id.cmp(&b.resource_id))
    }
}

/// Highest accepted offset; anything above reads as an empty page
pub const MAX_OFFSET: usize = i64::MAX as usize;

/// Offset page; `limit` is always within `1..=MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset: offset.min(MAX_OFFSET),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Lenient parse of raw query values; garbage falls back to the defaults
    pub fn parse(cursor: Option<&str>, limit: Option<&str>) -> Self {
        let offset = cursor
            .and_then(|c| c.trim().parse::<usize>().ok())
            .unwrap_or(0);
        let limit = limit
            .and_then(|l| l.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self::new(offset, limit)
    }

    /// Cursor of the following page, if rows remain
    pub fn next_cursor(&self, total: u64) -> Option<u64> {
        let next = self.offset.saturating_add(self.limit) as u64;
        (next < total).then_some(next)
    }
}

/// Row filters; empty fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    /// Category must be one of these
    pub categories: Vec<String>,
    /// Resource must carry all of these tags
    pub tags: Vec<String>,
    /// Courses only; exact match
    pub semester: Option<String>,
    /// Case-insensitive substring of name, description or a tag
    pub keyword: Option<String>,
}

impl ResourceFilter {
    /// Drop blank values so `?tag=` does not filter everything out
    pub fn normalized(mut self) -> Self {
        let clean = |values: Vec<String>| -> Vec<String> {
            values
                .into_iter()
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .collect()
        };
        self.categories = clean(self.categories);
        self.tags = clean(self.tags);
        self.semester = self.semester.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());
        self.keyword = self.keyword.map(|k| k.trim().to_owned()).filter(|k| !k.is_empty());
        self
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&resource.category) {
            return false;
        }

        if !self.tags.iter().all(|t| resource.tags.contains(t)) {
            return false;
        }

        if let Some(semester) = &self.semester {
            match &resource.details {
                ResourceDetails::Course(course) if &course.semester == semester => {}
                _ => return false,
            }
        }

        if let Some(keyword) = &self.keyword {
            let needle = keyword.to_lowercase();
            let hit = resource.name.to_lowercase().contains(&needle)
                || resource.description.to_lowercase().contains(&needle)
                || resource.tags.iter().any(|t| t.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        true
    }
}

/// Full listing request handed to a store
#[derive(Debug, Clone)]
pub struct ResourceQuery {
    pub kind: ResourceKind,
    pub status: AuditStatus,
    pub filter: ResourceFilter,
    pub sort: SortKey,
    pub page: PageRequest,
}

impl ResourceQuery {
    /// Approved resources of one family
    pub fn public(kind: ResourceKind) -> Self {
        Self {
            kind,
            status: AuditStatus::Approved,
            filter: ResourceFilter::default(),
            sort: SortKey::default(),
            page: PageRequest::default(),
        }
    }
}

/// One page plus the number of rows matching the query
#[derive(Debug, Clone, Default)]
pub struct ResourcePage {
    pub items: Vec<Resource>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_clamp() {
        assert_eq!(PageRequest::new(0, 0).limit, 1);
        assert_eq!(PageRequest::new(0, 500).limit, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::parse(None, None), PageRequest::default());
        assert_eq!(PageRequest::parse(Some("abc"), Some("")).offset, 0);
        assert_eq!(PageRequest::parse(Some("20"), Some("5")), PageRequest::new(20, 5));
    }

    #[test]
    fn test_next_cursor() {
        let page = PageRequest::new(0, 10);
        assert_eq!(page.next_cursor(25), Some(10));
        assert_eq!(page.next_cursor(10), None);
        assert_eq!(PageRequest::new(20, 10).next_cursor(25), None);
    }

    #[test]
    fn test_huge_cursor() {
        let page = PageRequest::parse(Some("18446744073709551615"), Some("10"));
        assert_eq!(page.offset, MAX_OFFSET);
        assert_eq!(page.next_cursor(3), None);
        assert_eq!(page.next_cursor(u64::MAX), Some(MAX_OFFSET as u64 + 10));
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(SortKey::parse(None), SortKey::Latest);
        assert_eq!(SortKey::parse(Some("likes")), SortKey::Likes);
        assert_eq!(SortKey::parse(Some("Oldest")), SortKey::Oldest);
        assert_eq!(SortKey::parse(Some("random")), SortKey::Latest);
    }

    #[test]
    fn test_filter_normalized() {
        let filter = ResourceFilter {
            tags: vec!["".into(), " rust ".into()],
            keyword: Some("  ".into()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(filter.tags, vec!["rust"]);
        assert!(filter.keyword.is_none());
    }
}
