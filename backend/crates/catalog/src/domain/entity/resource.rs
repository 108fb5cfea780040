//! Resource Entity
//!
//! Tools, courses and projects share one shape; family-specific fields live
//! in [`ResourceDetails`].

use auth::CurrentUser;
use chrono::{DateTime, Utc};
use kernel::id::{MaterialId, ResourceId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::transition::StatusTransition;
use crate::domain::value_object::{
    audit_status::{AuditStatus, OwnerAction, ReviewAction},
    resource_kind::ResourceKind,
};
use crate::error::{CatalogError, CatalogResult};

pub const NAME_MAX_LENGTH: usize = 100;

pub const DESCRIPTION_MAX_LENGTH: usize = 2000;

pub const MAX_TAGS: usize = 10;

/// Aggregate counters; only the engagement actions change them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engagement {
    pub views: i64,
    pub likes: i64,
    pub collections: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditState {
    pub status: AuditStatus,
    pub submitted_at: DateTime<Utc>,
    pub audited_at: Option<DateTime<Utc>>,
    pub reject_reason: Option<String>,
}

impl AuditState {
    fn submitted(at: DateTime<Utc>) -> Self {
        Self {
            status: AuditStatus::Pending,
            submitted_at: at,
            audited_at: None,
            reject_reason: None,
        }
    }
}

/// Course attachment: a web link or an uploaded-file reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub material_id: MaterialId,
    pub introduction: String,
    pub url: Option<String>,
    pub file: Option<String>,
    pub tags: Vec<String>,
    pub uploader: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Material {
    /// Link or file reference, whichever was supplied
    pub fn location(&self) -> &str {
        self.url
            .as_deref()
            .or(self.file.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDetails {
    pub link: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetails {
    pub teachers: Vec<String>,
    pub semester: String,
    pub credit: u32,
    #[serde(default)]
    pub materials: Vec<Material>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub detail: String,
    pub github: String,
}

/// Family-specific fields, stored as a tagged JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceDetails {
    Tool(ToolDetails),
    Course(CourseDetails),
    Project(ProjectDetails),
}

impl ResourceDetails {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceDetails::Tool(_) => ResourceKind::Tool,
            ResourceDetails::Course(_) => ResourceKind::Course,
            ResourceDetails::Project(_) => ResourceKind::Project,
        }
    }
}

/// Fields common to every family, as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceContent {
    pub name: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub images: Vec<String>,
}

impl ResourceContent {
    /// Trim fields, drop blank and duplicate tags, enforce limits
    pub fn validated(mut self) -> CatalogResult<Self> {
        self.name = self.name.trim().to_owned();
        self.description = self.description.trim().to_owned();
        self.category = self.category.trim().to_owned();

        if self.name.is_empty() {
            return Err(CatalogError::invalid_input("Name cannot be empty"));
        }
        if self.name.chars().count() > NAME_MAX_LENGTH {
            return Err(CatalogError::invalid_input(format!(
                "Name must be at most {} characters",
                NAME_MAX_LENGTH
            )));
        }
        if self.description.chars().count() > DESCRIPTION_MAX_LENGTH {
            return Err(CatalogError::invalid_input(format!(
                "Description must be at most {} characters",
                DESCRIPTION_MAX_LENGTH
            )));
        }

        self.tags = clean_list(self.tags);
        if self.tags.len() > MAX_TAGS {
            return Err(CatalogError::invalid_input(format!(
                "At most {} tags are allowed",
                MAX_TAGS
            )));
        }
        self.images = clean_list(self.images);

        Ok(self)
    }
}

/// Trimmed, non-empty, first occurrence kept
pub fn clean_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !out.iter().any(|v| v == value) {
            out.push(value.to_owned());
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct Resource {
    pub resource_id: ResourceId,
    pub owner_id: UserId,
    /// Submitter's user name at submission time
    pub owner_name: String,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Tags, or the tech stack for projects
    pub tags: Vec<String>,
    /// Image links; the first one is the cover
    pub images: Vec<String>,
    /// User names, submitter first
    pub contributors: Vec<String>,
    pub stats: Engagement,
    pub audit: AuditState,
    pub details: ResourceDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// New pending submission
    pub fn submit(owner: &CurrentUser, content: ResourceContent, details: ResourceDetails) -> Self {
        let now = Utc::now();

        Self {
            resource_id: ResourceId::new(),
            owner_id: owner.user_id,
            owner_name: owner.user_name.clone(),
            name: content.name,
            description: content.description,
            category: content.category,
            tags: content.tags,
            images: content.images,
            contributors: vec![owner.user_name.clone()],
            stats: Engagement::default(),
            audit: AuditState::submitted(now),
            details,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.details.kind()
    }

    /// `<family>:<uuid>`, as exposed on pending items
    pub fn item_id(&self) -> String {
        format!("{}:{}", self.kind().code(), self.resource_id)
    }

    pub fn cover(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn is_public(&self) -> bool {
        self.audit.status == AuditStatus::Approved
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Approved resources are public; others only for the owner and admins
    pub fn visible_to(&self, viewer: Option<&CurrentUser>) -> bool {
        self.is_public()
            || viewer.is_some_and(|v| v.is_admin() || self.is_owned_by(&v.user_id))
    }

    pub fn ensure_owner(&self, user: &CurrentUser) -> CatalogResult<()> {
        if self.is_owned_by(&user.user_id) {
            Ok(())
        } else {
            Err(CatalogError::NotOwner(self.kind()))
        }
    }

    /// Replace the common fields; audit status is kept
    pub fn apply_content(&mut self, content: ResourceContent) {
        self.name = content.name;
        self.description = content.description;
        self.category = content.category;
        self.tags = content.tags;
        self.images = content.images;
        self.updated_at = Utc::now();
    }

    pub fn add_contributor(&mut self, user_name: &str) {
        if !self.contributors.iter().any(|c| c == user_name) {
            self.contributors.push(user_name.to_owned());
        }
    }

    /// Admin decision; only pending submissions can be reviewed
    pub fn review(
        &mut self,
        action: ReviewAction,
        reason: Option<String>,
        operator: &str,
    ) -> CatalogResult<StatusTransition> {
        let from = self.audit.status;
        if from != AuditStatus::Pending {
            return Err(CatalogError::InvalidTransition {
                from,
                action: "review",
            });
        }

        let now = Utc::now();
        self.audit.status = action.target();
        self.audit.audited_at = Some(now);
        self.audit.reject_reason = match action {
            ReviewAction::Reject => reason.map(|r| r.trim().to_owned()).filter(|r| !r.is_empty()),
            ReviewAction::Approve => None,
        };
        self.updated_at = now;

        Ok(StatusTransition::record(self, from, operator, now))
    }

    /// Withdraw or resubmit one's own submission
    pub fn apply_owner_action(
        &mut self,
        action: OwnerAction,
        operator: &CurrentUser,
    ) -> CatalogResult<StatusTransition> {
        self.ensure_owner(operator)?;

        let from = self.audit.status;
        let to = action.apply(from).ok_or(CatalogError::InvalidTransition {
            from,
            action: match action {
                OwnerAction::Withdraw => "withdraw",
                OwnerAction::Resubmit => "resubmit",
            },
        })?;

        let now = Utc::now();
        self.audit.status = to;
        if to == AuditStatus::Pending {
            self.audit.submitted_at = now;
            self.audit.audited_at = None;
            self.audit.reject_reason = None;
        }
        self.updated_at = now;

        Ok(StatusTransition::record(self, from, &operator.user_name, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::UserRole;

    fn user(name: &str, role: UserRole) -> CurrentUser {
        CurrentUser {
            user_id: UserId::new(),
            user_name: name.to_string(),
            user_role: role,
        }
    }

    fn tool(owner: &CurrentUser) -> Resource {
        Resource::submit(
            owner,
            ResourceContent {
                name: "ripgrep".into(),
                tags: vec!["cli".into()],
                ..Default::default()
            },
            ResourceDetails::Tool(ToolDetails {
                link: "https://github.com/BurntSushi/ripgrep".into(),
                detail: String::new(),
            }),
        )
    }

    #[test]
    fn test_submit_is_pending() {
        let owner = user("alice", UserRole::User);
        let resource = tool(&owner);
        assert_eq!(resource.audit.status, AuditStatus::Pending);
        assert_eq!(resource.contributors, vec!["alice"]);
        assert_eq!(resource.kind(), ResourceKind::Tool);
        assert!(resource.item_id().starts_with("tool:"));
    }

    #[test]
    fn test_visibility() {
        let owner = user("alice", UserRole::User);
        let other = user("bob", UserRole::User);
        let admin = user("root", UserRole::Admin);
        let mut resource = tool(&owner);

        assert!(resource.visible_to(Some(&owner)));
        assert!(resource.visible_to(Some(&admin)));
        assert!(!resource.visible_to(Some(&other)));
        assert!(!resource.visible_to(None));

        resource.review(ReviewAction::Approve, None, "root").unwrap();
        assert!(resource.visible_to(None));
    }

    #[test]
    fn test_review_only_pending() {
        let owner = user("alice", UserRole::User);
        let mut resource = tool(&owner);

        let transition = resource
            .review(ReviewAction::Reject, Some(" spam ".into()), "root")
            .unwrap();
        assert_eq!(transition.old_status, AuditStatus::Pending);
        assert_eq!(transition.new_status, AuditStatus::Rejected);
        assert_eq!(resource.audit.reject_reason.as_deref(), Some("spam"));

        assert!(matches!(
            resource.review(ReviewAction::Approve, None, "root"),
            Err(CatalogError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_owner_resubmit_after_reject() {
        let owner = user("alice", UserRole::User);
        let mut resource = tool(&owner);
        resource
            .review(ReviewAction::Reject, Some("dup".into()), "root")
            .unwrap();

        let transition = resource
            .apply_owner_action(OwnerAction::Resubmit, &owner)
            .unwrap();
        assert_eq!(transition.new_status, AuditStatus::Pending);
        assert!(resource.audit.reject_reason.is_none());

        let other = user("bob", UserRole::User);
        assert!(matches!(
            resource.apply_owner_action(OwnerAction::Withdraw, &other),
            Err(CatalogError::NotOwner(ResourceKind::Tool))
        ));
    }

    #[test]
    fn test_content_validation() {
        let content = ResourceContent {
            name: "  ".into(),
            ..Default::default()
        };
        assert!(content.validated().is_err());

        let content = ResourceContent {
            name: " grep ".into(),
            tags: vec!["a".into(), " a ".into(), "".into(), "b".into()],
            ..Default::default()
        }
        .validated()
        .unwrap();
        assert_eq!(content.name, "grep");
        assert_eq!(content.tags, vec!["a", "b"]);
    }
}
