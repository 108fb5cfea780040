//! API DTOs (Data Transfer Objects)
//!
//! Response keys follow the public wire format: camelCase for resource
//! fields, with the historical comment keys (`comment_Id`, `avater`,
//! `love_count`) and viewer flags (`isliked`, `iscollected`) kept verbatim.
//! Resources carry the historical keys (`resourceName`, `catagory`,
//! `image`, `loves`, `createdat`) next to the corrected ones. Request
//! fields accept both the historical spelling (`catagory`) and the
//! corrected one.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, MaterialId, ResourceId};
use serde::{Deserialize, Serialize};

use crate::application::{
    CoursePatch, CourseSubmission, ListInput, MaterialUpload, PendingPage, ProjectPatch,
    ProjectSubmission, ResourceDetail, ResourceListing, ToolSubmission,
};
use crate::domain::entity::{
    comment::{Comment, CommentThread},
    resource::{Material, Resource, ResourceDetails},
    transition::StatusTransition,
};
use crate::domain::repository::EngagementState;
use crate::domain::value_object::{
    audit_status::AuditStatus,
    listing::{PageRequest, ResourceFilter, SortKey},
    resource_kind::ResourceKind,
};

// ============================================================================
// Listing
// ============================================================================

/// Query string of the list and search routes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    #[serde(alias = "catagory")]
    pub category: Vec<String>,
    /// Tags, or the tech stack for projects
    #[serde(alias = "techStack", alias = "tags")]
    pub tag: Vec<String>,
    pub semester: Option<String>,
    pub keyword: Option<String>,
    pub sort: Option<String>,
    pub cursor: Option<String>,
    #[serde(alias = "page_size", alias = "pageSize")]
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> PageRequest {
        PageRequest::parse(self.cursor.as_deref(), self.limit.as_deref())
    }
}

impl From<ListQuery> for ListInput {
    fn from(query: ListQuery) -> Self {
        let page = query.page();
        Self {
            filter: ResourceFilter {
                categories: query.category,
                tags: query.tag,
                semester: query.semester,
                keyword: query.keyword,
            },
            sort: SortKey::parse(query.sort.as_deref()),
            page,
        }
    }
}

/// List / search response
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub message: Cow<'static, str>,
    pub data: Vec<ResourceView>,
    pub total: u64,
    #[serde(rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<u64>,
}

// ============================================================================
// Resources
// ============================================================================

/// Family-specific response fields, flattened into [`ResourceView`]
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FamilyFields {
    Tool {
        #[serde(rename = "resourceLink")]
        link: String,
        description_detail: String,
    },
    Course {
        teacher: Vec<String>,
        semester: String,
        credit: u32,
        textbooks: Vec<MaterialView>,
    },
    Project {
        detail: String,
        #[serde(rename = "githubURL")]
        github: String,
        #[serde(rename = "techStack")]
        tech_stack: Vec<String>,
    },
}

impl FamilyFields {
    fn from_resource(resource: &Resource) -> Self {
        match &resource.details {
            ResourceDetails::Tool(tool) => FamilyFields::Tool {
                link: tool.link.clone(),
                description_detail: tool.detail.clone(),
            },
            ResourceDetails::Course(course) => FamilyFields::Course {
                teacher: course.teachers.clone(),
                semester: course.semester.clone(),
                credit: course.credit,
                textbooks: course.materials.iter().map(MaterialView::from).collect(),
            },
            ResourceDetails::Project(project) => FamilyFields::Project {
                detail: project.detail.clone(),
                github: project.github.clone(),
                tech_stack: resource.tags.clone(),
            },
        }
    }
}

/// Resource as listed and as returned after a submission or update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceView {
    pub resource_id: ResourceId,
    pub resource_type: ResourceKind,
    pub item_id: String,
    pub resource_name: String,
    pub name: String,
    pub description: String,
    pub catagory: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: Vec<String>,
    pub images: Vec<String>,
    pub cover: Option<String>,
    pub contributors: Vec<String>,
    pub views: i64,
    pub loves: i64,
    pub likes: i64,
    pub collections: i64,
    #[serde(rename = "comment_count")]
    pub comment_count: i64,
    pub audit_status: AuditStatus,
    pub createdat: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub family: FamilyFields,
}

impl ResourceView {
    pub fn with_comment_count(mut self, count: i64) -> Self {
        self.comment_count = count;
        self
    }

    /// Items of a listing page, each with its comment count
    pub fn listing(listing: &ResourceListing) -> Vec<Self> {
        listing
            .items
            .iter()
            .map(|r| Self::from(r).with_comment_count(listing.comment_count(&r.resource_id)))
            .collect()
    }
}

impl From<&Resource> for ResourceView {
    fn from(resource: &Resource) -> Self {
        Self {
            resource_id: resource.resource_id,
            resource_type: resource.kind(),
            item_id: resource.item_id(),
            resource_name: resource.name.clone(),
            name: resource.name.clone(),
            description: resource.description.clone(),
            catagory: resource.category.clone(),
            category: resource.category.clone(),
            tags: resource.tags.clone(),
            image: resource.images.clone(),
            images: resource.images.clone(),
            cover: resource.cover().map(str::to_owned),
            contributors: resource.contributors.clone(),
            views: resource.stats.views,
            loves: resource.stats.likes,
            likes: resource.stats.likes,
            collections: resource.stats.collections,
            comment_count: 0,
            audit_status: resource.audit.status,
            createdat: resource.created_at,
            created_at: resource.created_at,
            updated_at: resource.updated_at,
            family: FamilyFields::from_resource(resource),
        }
    }
}

/// Detail page
#[derive(Debug, Clone, Serialize)]
pub struct ResourceDetailView {
    #[serde(flatten)]
    pub resource: ResourceView,
    pub isliked: bool,
    pub iscollected: bool,
    pub comments: Vec<CommentView>,
}

impl ResourceDetailView {
    pub fn new(detail: &ResourceDetail, viewer: Option<&auth::CurrentUser>) -> Self {
        Self {
            resource: ResourceView::from(&detail.resource).with_comment_count(detail.comment_count),
            isliked: detail.flags.liked,
            iscollected: detail.flags.collected,
            comments: detail
                .threads
                .iter()
                .map(|t| CommentView::thread(t, viewer))
                .collect(),
        }
    }
}

// ============================================================================
// Submissions
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolSubmitRequest {
    pub name: String,
    pub link: String,
    pub description: String,
    #[serde(alias = "descriptionDetail")]
    pub description_detail: String,
    #[serde(alias = "category")]
    pub catagory: String,
    pub tags: Vec<String>,
    #[serde(alias = "image")]
    pub images: Vec<String>,
}

impl From<ToolSubmitRequest> for ToolSubmission {
    fn from(req: ToolSubmitRequest) -> Self {
        Self {
            name: req.name,
            link: req.link,
            description: req.description,
            detail: req.description_detail,
            category: req.catagory,
            tags: req.tags,
            images: req.images,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CourseSubmitRequest {
    pub name: String,
    pub description: String,
    #[serde(alias = "teacher")]
    pub teachers: Vec<String>,
    #[serde(alias = "catagory")]
    pub category: String,
    pub semester: String,
    pub credit: u32,
    pub cover: Option<String>,
    pub tags: Vec<String>,
}

impl From<CourseSubmitRequest> for CourseSubmission {
    fn from(req: CourseSubmitRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            teachers: req.teachers,
            category: req.category,
            semester: req.semester,
            credit: req.credit,
            cover: req.cover,
            tags: req.tags,
        }
    }
}

/// Course update; absent fields are kept
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CourseUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "teacher")]
    pub teachers: Option<Vec<String>>,
    #[serde(alias = "catagory")]
    pub category: Option<String>,
    pub semester: Option<String>,
    pub credit: Option<u32>,
    pub cover: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl From<CourseUpdateRequest> for CoursePatch {
    fn from(req: CourseUpdateRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            teachers: req.teachers,
            category: req.category,
            semester: req.semester,
            credit: req.credit,
            cover: req.cover,
            tags: req.tags,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectSubmitRequest {
    pub name: String,
    pub description: String,
    pub detail: String,
    #[serde(alias = "githubURL", alias = "github_url")]
    pub github: String,
    #[serde(rename = "techStack", alias = "tech_stack")]
    pub tech_stack: Vec<String>,
    #[serde(alias = "category")]
    pub catagory: String,
    pub images: Vec<String>,
}

impl From<ProjectSubmitRequest> for ProjectSubmission {
    fn from(req: ProjectSubmitRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            detail: req.detail,
            github: req.github,
            tech_stack: req.tech_stack,
            category: req.catagory,
            images: req.images,
        }
    }
}

/// Project update; absent fields are kept
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub detail: Option<String>,
    #[serde(alias = "githubURL", alias = "github_url")]
    pub github: Option<String>,
    #[serde(rename = "techStack", alias = "tech_stack")]
    pub tech_stack: Option<Vec<String>>,
    #[serde(alias = "category")]
    pub catagory: Option<String>,
    pub images: Option<Vec<String>>,
}

impl From<ProjectUpdateRequest> for ProjectPatch {
    fn from(req: ProjectUpdateRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            detail: req.detail,
            github: req.github,
            tech_stack: req.tech_stack,
            category: req.catagory,
            images: req.images,
        }
    }
}

// ============================================================================
// Course materials
// ============================================================================

/// `resource` is a web link, `file` an uploaded-file reference
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MaterialUploadRequest {
    #[serde(alias = "introduction", alias = "resource_intro")]
    pub description: String,
    #[serde(alias = "url", alias = "resource_url")]
    pub resource: Option<String>,
    #[serde(alias = "resource_upload")]
    pub file: Option<String>,
    pub tags: Vec<String>,
}

impl From<MaterialUploadRequest> for MaterialUpload {
    fn from(req: MaterialUploadRequest) -> Self {
        Self {
            introduction: req.description,
            url: req.resource,
            file: req.file,
            tags: req.tags,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterialView {
    #[serde(rename = "textbookId")]
    pub material_id: MaterialId,
    pub resource_intro: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_upload: Option<String>,
    pub tags: Vec<String>,
    pub uploader: String,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
}

impl From<&Material> for MaterialView {
    fn from(material: &Material) -> Self {
        Self {
            material_id: material.material_id,
            resource_intro: material.introduction.clone(),
            resource_url: material.url.clone(),
            resource_upload: material.file.clone(),
            tags: material.tags.clone(),
            uploader: material.uploader.clone(),
            uploaded_at: material.uploaded_at,
        }
    }
}

/// Download answer: where the material lives
#[derive(Debug, Clone, Serialize)]
pub struct DownloadView {
    #[serde(rename = "textbookId")]
    pub material_id: MaterialId,
    pub url: String,
}

// ============================================================================
// Engagement
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ViewCount {
    pub views: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LikeView {
    pub isliked: bool,
    pub likes: i64,
}

impl From<EngagementState> for LikeView {
    fn from(state: EngagementState) -> Self {
        Self {
            isliked: state.active,
            likes: state.count,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CollectView {
    pub iscollected: bool,
    pub collections: i64,
}

impl From<EngagementState> for CollectView {
    fn from(state: EngagementState) -> Self {
        Self {
            iscollected: state.active,
            collections: state.count,
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    #[serde(alias = "comment", alias = "body")]
    pub content: String,
}

/// `?commentId=` of `DELETE .../comments`
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteCommentQuery {
    #[serde(rename = "commentId", alias = "comment_id", alias = "comment_Id")]
    pub comment_id: String,
}

/// `?replyId=` of `DELETE .../reply`
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteReplyQuery {
    #[serde(rename = "replyId", alias = "reply_id")]
    pub reply_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    #[serde(rename = "comment_Id")]
    pub comment_id: CommentId,
    /// Parent comment, replies only
    #[serde(rename = "commentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
    pub nickname: String,
    pub avater: String,
    pub comment: String,
    #[serde(rename = "commentDate")]
    pub comment_date: DateTime<Utc>,
    pub love_count: i64,
    /// Whether the viewer wrote it; absent for anonymous viewers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isowner: Option<bool>,
    pub isreply: bool,
    pub reply_total: usize,
    pub replies: Vec<CommentView>,
}

impl CommentView {
    pub fn single(comment: &Comment, viewer: Option<&auth::CurrentUser>) -> Self {
        Self {
            comment_id: comment.comment_id,
            parent_id: comment.parent_id,
            nickname: comment.author.nickname.clone(),
            avater: comment.author.avatar.clone(),
            comment: comment.body.clone(),
            comment_date: comment.created_at,
            love_count: comment.like_count,
            isowner: viewer.map(|v| v.user_id == comment.author_id),
            isreply: comment.is_reply(),
            reply_total: 0,
            replies: Vec::new(),
        }
    }

    pub fn thread(thread: &CommentThread, viewer: Option<&auth::CurrentUser>) -> Self {
        let replies: Vec<CommentView> = thread
            .replies
            .iter()
            .map(|r| CommentView::single(r, viewer))
            .collect();

        Self {
            reply_total: replies.len(),
            replies,
            ..CommentView::single(&thread.comment, viewer)
        }
    }
}

/// Delete answer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeletedView {
    pub deleted: u64,
}

// ============================================================================
// User library
// ============================================================================

/// Collected resource card
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalView {
    pub resource_id: ResourceId,
    pub resource_type: ResourceKind,
    pub resource: String,
    pub image: String,
    pub introduce: String,
    pub contributer: Vec<String>,
}

impl From<&Resource> for PersonalView {
    fn from(resource: &Resource) -> Self {
        Self {
            resource_id: resource.resource_id,
            resource_type: resource.kind(),
            resource: resource.name.clone(),
            image: resource.cover().unwrap_or_default().to_owned(),
            introduce: resource.description.clone(),
            contributer: resource.contributors.clone(),
        }
    }
}

/// Collection grouped by family
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectionView {
    pub tools: Vec<PersonalView>,
    pub courses: Vec<PersonalView>,
    pub projects: Vec<PersonalView>,
}

impl CollectionView {
    pub fn group(resources: &[Resource]) -> Self {
        let mut view = Self::default();
        for resource in resources {
            let card = PersonalView::from(resource);
            match resource.kind() {
                ResourceKind::Tool => view.tools.push(card),
                ResourceKind::Course => view.courses.push(card),
                ResourceKind::Project => view.projects.push(card),
            }
        }
        view
    }
}

/// Review record of one's own submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecordView {
    pub resource_id: ResourceId,
    pub resource_type: ResourceKind,
    pub resource: String,
    pub audit_status: AuditStatus,
    pub submit_time: DateTime<Utc>,
    pub audit_time: Option<DateTime<Utc>>,
    pub reject_reason: Option<String>,
}

impl From<&Resource> for ReviewRecordView {
    fn from(resource: &Resource) -> Self {
        Self {
            resource_id: resource.resource_id,
            resource_type: resource.kind(),
            resource: resource.name.clone(),
            audit_status: resource.audit.status,
            submit_time: resource.audit.submitted_at,
            audit_time: resource.audit.audited_at,
            reject_reason: resource.audit.reject_reason.clone(),
        }
    }
}

/// Review record plus the audit trail, oldest change first
#[derive(Debug, Clone, Serialize)]
pub struct StatusRecordView {
    #[serde(flatten)]
    pub record: ReviewRecordView,
    pub history: Vec<TransitionView>,
}

impl StatusRecordView {
    pub fn new(resource: &Resource, history: &[StatusTransition]) -> Self {
        Self {
            record: ReviewRecordView::from(resource),
            history: history.iter().map(TransitionView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusActionRequest {
    /// `withdraw` or `resubmit`
    #[serde(alias = "state")]
    pub action: String,
}

/// Audit status change
#[derive(Debug, Clone, Serialize)]
pub struct TransitionView {
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
    #[serde(rename = "resourceType")]
    pub resource_type: ResourceKind,
    pub newstatus: AuditStatus,
    pub oldestatus: AuditStatus,
    #[serde(rename = "operateTime")]
    pub operate_time: DateTime<Utc>,
    pub operator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&StatusTransition> for TransitionView {
    fn from(t: &StatusTransition) -> Self {
        Self {
            resource_id: t.resource_id,
            resource_type: t.kind,
            newstatus: t.new_status,
            oldestatus: t.old_status,
            operate_time: t.operated_at,
            operator: t.operator.clone(),
            reason: t.reason.clone(),
        }
    }
}

// ============================================================================
// Admin
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PendingQuery {
    #[serde(rename = "type", alias = "itemType")]
    pub item_type: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

/// Pending submission as shown to admins
#[derive(Debug, Clone, Serialize)]
pub struct PendingItemView {
    pub submitor: String,
    #[serde(rename = "submitDate")]
    pub submit_date: DateTime<Utc>,
    #[serde(rename = "itemId")]
    pub item_id: String,
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
    #[serde(rename = "resourceType")]
    pub resource_type: ResourceKind,
    pub catagory: String,
    pub link: String,
    pub file: String,
    pub description: String,
    pub tags: Vec<String>,
    pub resourcename: String,
}

impl From<&Resource> for PendingItemView {
    fn from(resource: &Resource) -> Self {
        let link = match &resource.details {
            ResourceDetails::Tool(tool) => tool.link.clone(),
            ResourceDetails::Project(project) => project.github.clone(),
            ResourceDetails::Course(_) => String::new(),
        };

        Self {
            submitor: resource.owner_name.clone(),
            submit_date: resource.audit.submitted_at,
            item_id: resource.item_id(),
            resource_id: resource.resource_id,
            resource_type: resource.kind(),
            catagory: resource.category.clone(),
            link,
            file: resource.cover().unwrap_or_default().to_owned(),
            description: resource.description.clone(),
            tags: resource.tags.clone(),
            resourcename: resource.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingResponse {
    pub message: Cow<'static, str>,
    pub total: u64,
    pub cursor: u64,
    pub data: Vec<PendingItemView>,
}

impl From<PendingPage> for PendingResponse {
    fn from(page: PendingPage) -> Self {
        Self {
            message: "success".into(),
            total: page.total,
            cursor: page.cursor,
            data: page.items.iter().map(PendingItemView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub action: String,
    #[serde(
        default,
        rename = "gejrct_reason",
        alias = "rejectReason",
        alias = "reject_reason"
    )]
    pub reject_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::{CurrentUser, UserRole};
    use kernel::id::UserId;

    use crate::domain::entity::comment::Author;
    use crate::domain::entity::resource::{ResourceContent, ToolDetails};

    fn tool() -> Resource {
        let owner = CurrentUser {
            user_id: UserId::new(),
            user_name: "alice".into(),
            user_role: UserRole::User,
        };
        Resource::submit(
            &owner,
            ResourceContent {
                name: "ripgrep".into(),
                tags: vec!["cli".into()],
                images: vec!["rg.png".into()],
                ..Default::default()
            },
            ResourceDetails::Tool(ToolDetails {
                link: "https://github.com/BurntSushi/ripgrep".into(),
                detail: "fast grep".into(),
            }),
        )
    }

    #[test]
    fn test_resource_view_keys() {
        let json = serde_json::to_value(ResourceView::from(&tool())).unwrap();
        assert_eq!(json["resourceType"], "tool");
        assert_eq!(json["resourceLink"], "https://github.com/BurntSushi/ripgrep");
        assert_eq!(json["description_detail"], "fast grep");
        assert_eq!(json["cover"], "rg.png");
        assert_eq!(json["auditStatus"], "pending");
        assert!(json["itemId"].as_str().unwrap().starts_with("tool:"));
    }

    #[test]
    fn test_comment_view_keys() {
        let resource = tool();
        let author_id = UserId::new();
        let comment = Comment::new(
            resource.resource_id,
            None,
            author_id,
            Author {
                nickname: "Al".into(),
                avatar: "al.png".into(),
            },
            "nice",
        )
        .unwrap();

        let json = serde_json::to_value(CommentView::single(&comment, None)).unwrap();
        assert_eq!(json["avater"], "al.png");
        assert_eq!(json["isreply"], false);
        assert!(json.get("comment_Id").is_some());
        assert!(json.get("commentId").is_none());
        assert!(json.get("isowner").is_none());
    }

    #[test]
    fn test_review_request_aliases() {
        let req: ReviewRequest =
            serde_json::from_str(r#"{"action":"reject","gejrct_reason":"spam"}"#).unwrap();
        assert_eq!(req.reject_reason.as_deref(), Some("spam"));

        let req: ReviewRequest =
            serde_json::from_str(r#"{"action":"reject","rejectReason":"dup"}"#).unwrap();
        assert_eq!(req.reject_reason.as_deref(), Some("dup"));

        let req: ReviewRequest = serde_json::from_str(r#"{"action":"approve"}"#).unwrap();
        assert!(req.reject_reason.is_none());
    }

    #[test]
    fn test_list_query_into_input() {
        let query = ListQuery {
            tag: vec!["rust".into()],
            sort: Some("likes".into()),
            cursor: Some("20".into()),
            ..Default::default()
        };
        let input = ListInput::from(query);
        assert_eq!(input.sort, SortKey::Likes);
        assert_eq!(input.page.offset, 20);
        assert_eq!(input.filter.tags, vec!["rust"]);
    }
}
