//! HTTP Handlers
//!
//! One handler set serves all three families; the family comes from the
//! router's [`FamilyState`].

use std::sync::Arc;

use auth::extract::MaybeUser;
use auth::{CurrentUser, TokenIssuer};
use axum::Json;
use axum::extract::{FromRef, Path, State};
use kernel::id::{CommentId, Id, MaterialId, ResourceId};
use kernel::response::ApiResponse;
use platform::extract::{JsonOrForm, QueryParams};

use crate::application::{
    CommentUseCase, CourseMaterialUseCase, EngagementUseCase, GetPendingUseCase,
    GetResourceUseCase, LibraryUseCase, ListResourcesUseCase, Reaction, ResourcePatch,
    ReviewInput, ReviewItemUseCase, SubmitResourceUseCase, Submission, UpdateResourceUseCase,
};
use crate::domain::repository::{CatalogRepository, EngagementState};
use crate::domain::value_object::{
    audit_status::OwnerAction, listing::PageRequest, resource_kind::ResourceKind,
};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    CollectView, CollectionView, CommentRequest, CommentView, CourseSubmitRequest,
    CourseUpdateRequest, DeleteCommentQuery, DeleteReplyQuery, DeletedView, DownloadView,
    LikeView, ListQuery, ListResponse, MaterialUploadRequest, MaterialView, PendingQuery,
    PendingResponse, ProjectSubmitRequest, ProjectUpdateRequest, ResourceDetailView,
    ResourceView, ReviewRecordView, ReviewRequest, StatusActionRequest, StatusRecordView,
    ToolSubmitRequest, TransitionView, ViewCount,
};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R>
where
    R: CatalogRepository,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenIssuer>,
}

impl<R> CatalogAppState<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: R, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            repo: Arc::new(repo),
            tokens,
        }
    }
}

impl<R> FromRef<CatalogAppState<R>> for Arc<TokenIssuer>
where
    R: CatalogRepository,
{
    fn from_ref(state: &CatalogAppState<R>) -> Self {
        state.tokens.clone()
    }
}

/// Catalog state bound to one resource family
#[derive(Clone)]
pub struct FamilyState<R>
where
    R: CatalogRepository,
{
    pub catalog: CatalogAppState<R>,
    pub kind: ResourceKind,
}

impl<R> FromRef<FamilyState<R>> for CatalogAppState<R>
where
    R: CatalogRepository,
{
    fn from_ref(state: &FamilyState<R>) -> Self {
        state.catalog.clone()
    }
}

impl<R> FromRef<FamilyState<R>> for ResourceKind
where
    R: CatalogRepository,
{
    fn from_ref(state: &FamilyState<R>) -> Self {
        state.kind
    }
}

impl<R> FromRef<FamilyState<R>> for Arc<TokenIssuer>
where
    R: CatalogRepository,
{
    fn from_ref(state: &FamilyState<R>) -> Self {
        state.catalog.tokens.clone()
    }
}

fn parse_id<T>(raw: &str) -> CatalogResult<Id<T>> {
    Ok(Id::parse_str(raw)?)
}

fn parse_kind(raw: &str) -> CatalogResult<ResourceKind> {
    ResourceKind::parse(raw).ok_or_else(|| CatalogError::InvalidInput {
        message: format!("Unknown resource type: {raw}"),
        action: Some("Use tool, course or project".to_owned()),
    })
}

// ============================================================================
// Browse
// ============================================================================

/// GET /{family}/profile
pub async fn list<R>(
    State(app): State<CatalogAppState<R>>,
    State(kind): State<ResourceKind>,
    QueryParams(query): QueryParams<ListQuery>,
) -> CatalogResult<Json<ListResponse>>
where
    R: CatalogRepository,
{
    let page = query.page();
    let result = ListResourcesUseCase::new(app.repo.clone())
        .execute(kind, query.into())
        .await?;

    Ok(Json(ListResponse {
        message: "success".into(),
        data: ResourceView::listing(&result),
        next_cursor: page.next_cursor(result.total),
        total: result.total,
    }))
}

/// GET /{family}/search?keyword=
pub async fn search<R>(
    State(app): State<CatalogAppState<R>>,
    State(kind): State<ResourceKind>,
    QueryParams(query): QueryParams<ListQuery>,
) -> CatalogResult<Json<ListResponse>>
where
    R: CatalogRepository,
{
    let page = query.page();
    let keyword = query.keyword.clone().unwrap_or_default();
    let result = ListResourcesUseCase::new(app.repo.clone())
        .search(kind, &keyword, page)
        .await?;

    Ok(Json(ListResponse {
        message: "success".into(),
        data: ResourceView::listing(&result),
        next_cursor: page.next_cursor(result.total),
        total: result.total,
    }))
}

/// GET /{family}/{id}
pub async fn get_detail<R>(
    State(app): State<CatalogAppState<R>>,
    State(kind): State<ResourceKind>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<String>,
) -> CatalogResult<ApiResponse<ResourceDetailView>>
where
    R: CatalogRepository,
{
    let resource_id: ResourceId = parse_id(&id)?;
    let detail = GetResourceUseCase::new(app.repo.clone())
        .execute(kind, &resource_id, viewer.as_ref())
        .await?;

    Ok(ApiResponse::success(ResourceDetailView::new(
        &detail,
        viewer.as_ref(),
    )))
}

// ============================================================================
// Submissions and updates
// ============================================================================

async fn submit<R>(
    app: &CatalogAppState<R>,
    user: &CurrentUser,
    submission: Submission,
) -> CatalogResult<ApiResponse<ResourceView>>
where
    R: CatalogRepository,
{
    let kind = submission.kind();
    let resource = SubmitResourceUseCase::new(app.repo.clone())
        .execute(user, submission)
        .await?;

    Ok(ApiResponse::with_message(
        format!("{} submitted successfully", kind.label()),
        ResourceView::from(&resource),
    ))
}

/// POST /tools/submit
pub async fn submit_tool<R>(
    State(app): State<CatalogAppState<R>>,
    user: CurrentUser,
    JsonOrForm(req): JsonOrForm<ToolSubmitRequest>,
) -> CatalogResult<ApiResponse<ResourceView>>
where
    R: CatalogRepository,
{
    submit(&app, &user, Submission::Tool(req.into())).await
}

/// POST /courses/submit
pub async fn submit_course<R>(
    State(app): State<CatalogAppState<R>>,
    user: CurrentUser,
    JsonOrForm(req): JsonOrForm<CourseSubmitRequest>,
) -> CatalogResult<ApiResponse<ResourceView>>
where
    R: CatalogRepository,
{
    submit(&app, &user, Submission::Course(req.into())).await
}

/// POST /projects/upload
pub async fn submit_project<R>(
    State(app): State<CatalogAppState<R>>,
    user: CurrentUser,
    JsonOrForm(req): JsonOrForm<ProjectSubmitRequest>,
) -> CatalogResult<ApiResponse<ResourceView>>
where
    R: CatalogRepository,
{
    submit(&app, &user, Submission::Project(req.into())).await
}

async fn update<R>(
    app: &CatalogAppState<R>,
    user: &CurrentUser,
    id: &str,
    patch: ResourcePatch,
) -> CatalogResult<ApiResponse<ResourceView>>
where
    R: CatalogRepository,
{
    let resource_id: ResourceId = parse_id(id)?;
    let kind = patch.kind();
    let resource = UpdateResourceUseCase::new(app.repo.clone())
        .execute(user, &resource_id, patch)
        .await?;

    Ok(ApiResponse::with_message(
        format!("{} updated successfully", kind.label()),
        ResourceView::from(&resource),
    ))
}

/// PUT /courses/{id}
pub async fn update_course<R>(
    State(app): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path(id): Path<String>,
    JsonOrForm(req): JsonOrForm<CourseUpdateRequest>,
) -> CatalogResult<ApiResponse<ResourceView>>
where
    R: CatalogRepository,
{
    update(&app, &user, &id, ResourcePatch::Course(req.into())).await
}

/// PUT /projects/{id}
pub async fn update_project<R>(
    State(app): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path(id): Path<String>,
    JsonOrForm(req): JsonOrForm<ProjectUpdateRequest>,
) -> CatalogResult<ApiResponse<ResourceView>>
where
    R: CatalogRepository,
{
    update(&app, &user, &id, ResourcePatch::Project(req.into())).await
}

// ============================================================================
// Course materials
// ============================================================================

/// POST /courses/{id}/upload
pub async fn upload_material<R>(
    State(app): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path(id): Path<String>,
    JsonOrForm(req): JsonOrForm<MaterialUploadRequest>,
) -> CatalogResult<ApiResponse<MaterialView>>
where
    R: CatalogRepository,
{
    let course_id: ResourceId = parse_id(&id)?;
    let material = CourseMaterialUseCase::new(app.repo.clone())
        .upload(&user, &course_id, req.into())
        .await?;

    Ok(ApiResponse::with_message(
        "Resource uploaded successfully",
        MaterialView::from(&material),
    ))
}

/// GET /courses/{id}/textbooks/{textbookId}/download
pub async fn download_material<R>(
    State(app): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path((id, textbook_id)): Path<(String, String)>,
) -> CatalogResult<ApiResponse<DownloadView>>
where
    R: CatalogRepository,
{
    let course_id: ResourceId = parse_id(&id)?;
    let material_id: MaterialId = parse_id(&textbook_id)?;
    let material = CourseMaterialUseCase::new(app.repo.clone())
        .download(&user, &course_id, &material_id)
        .await?;

    Ok(ApiResponse::success(DownloadView {
        material_id: material.material_id,
        url: material.location().to_owned(),
    }))
}

// ============================================================================
// Engagement
// ============================================================================

/// POST /{family}/{id}/view(s)
pub async fn record_view<R>(
    State(app): State<CatalogAppState<R>>,
    State(kind): State<ResourceKind>,
    Path(id): Path<String>,
) -> CatalogResult<ApiResponse<ViewCount>>
where
    R: CatalogRepository,
{
    let resource_id: ResourceId = parse_id(&id)?;
    let views = EngagementUseCase::new(app.repo.clone())
        .view(kind, &resource_id)
        .await?;

    Ok(ApiResponse::success(ViewCount { views }))
}

async fn react<R>(
    app: &CatalogAppState<R>,
    kind: ResourceKind,
    user: &CurrentUser,
    id: &str,
    reaction: Reaction,
    active: bool,
) -> CatalogResult<EngagementState>
where
    R: CatalogRepository,
{
    let resource_id: ResourceId = parse_id(id)?;
    EngagementUseCase::new(app.repo.clone())
        .react(user, kind, &resource_id, reaction, active)
        .await
}

/// POST /{family}/{id}/like
pub async fn like<R>(
    State(app): State<CatalogAppState<R>>,
    State(kind): State<ResourceKind>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> CatalogResult<ApiResponse<LikeView>>
where
    R: CatalogRepository,
{
    let state = react(&app, kind, &user, &id, Reaction::Like, true).await?;
    Ok(ApiResponse::success(state.into()))
}

/// DELETE /{family}/{id}/like
pub async fn unlike<R>(
    State(app): State<CatalogAppState<R>>,
    State(kind): State<ResourceKind>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> CatalogResult<ApiResponse<LikeView>>
where
    R: CatalogRepository,
{
    let state = react(&app, kind, &user, &id, Reaction::Like, false).await?;
    Ok(ApiResponse::success(state.into()))
}

/// POST /{family}/{id}/collections|collected
pub async fn collect<R>(
    State(app): State<CatalogAppState<R>>,
    State(kind): State<ResourceKind>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> CatalogResult<ApiResponse<CollectView>>
where
    R: CatalogRepository,
{
    let state = react(&app, kind, &user, &id, Reaction::Collect, true).await?;
    Ok(ApiResponse::success(state.into()))
}

/// DELETE /{family}/{id}/collections|collected
pub async fn uncollect<R>(
    State(app): State<CatalogAppState<R>>,
    State(kind): State<ResourceKind>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> CatalogResult<ApiResponse<CollectView>>
where
    R: CatalogRepository,
{
    let state = react(&app, kind, &user, &id, Reaction::Collect, false).await?;
    Ok(ApiResponse::success(state.into()))
}

// ============================================================================
// Comments
// ============================================================================

/// POST /{family}/{id}/comments
pub async fn add_comment<R>(
    State(app): State<CatalogAppState<R>>,
    State(kind): State<ResourceKind>,
    user: CurrentUser,
    Path(id): Path<String>,
    JsonOrForm(req): JsonOrForm<CommentRequest>,
) -> CatalogResult<ApiResponse<CommentView>>
where
    R: CatalogRepository,
{
    let resource_id: ResourceId = parse_id(&id)?;
    let comment = CommentUseCase::new(app.repo.clone())
        .add(&user, kind, &resource_id, None, &req.content)
        .await?;

    Ok(ApiResponse::with_message(
        "Comment added successfully",
        CommentView::single(&comment, Some(&user)),
    ))
}

/// DELETE /{family}/{id}/comments?commentId=
pub async fn delete_comment<R>(
    State(app): State<CatalogAppState<R>>,
    State(kind): State<ResourceKind>,
    user: CurrentUser,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<DeleteCommentQuery>,
) -> CatalogResult<ApiResponse<DeletedView>>
where
    R: CatalogRepository,
{
    let resource_id: ResourceId = parse_id(&id)?;
    let comment_id: CommentId = parse_id(&query.comment_id)?;
    let deleted = CommentUseCase::new(app.repo.clone())
        .delete(&user, kind, &resource_id, &comment_id, None)
        .await?;

    Ok(ApiResponse::with_message(
        "Comment deleted successfully",
        DeletedView { deleted },
    ))
}

/// POST /{family}/{id}/comments/{commentId}/reply
pub async fn reply_comment<R>(
    State(app): State<CatalogAppState<R>>,
    State(kind): State<ResourceKind>,
    user: CurrentUser,
    Path((id, comment_id)): Path<(String, String)>,
    JsonOrForm(req): JsonOrForm<CommentRequest>,
) -> CatalogResult<ApiResponse<CommentView>>
where
    R: CatalogRepository,
{
    let resource_id: ResourceId = parse_id(&id)?;
    let parent_id: CommentId = parse_id(&comment_id)?;
    let reply = CommentUseCase::new(app.repo.clone())
        .add(&user, kind, &resource_id, Some(&parent_id), &req.content)
        .await?;

    Ok(ApiResponse::with_message(
        "Reply added successfully",
        CommentView::single(&reply, Some(&user)),
    ))
}

/// DELETE /{family}/{id}/comments/{commentId}/reply?replyId=
pub async fn delete_reply<R>(
    State(app): State<CatalogAppState<R>>,
    State(kind): State<ResourceKind>,
    user: CurrentUser,
    Path((id, comment_id)): Path<(String, String)>,
    QueryParams(query): QueryParams<DeleteReplyQuery>,
) -> CatalogResult<ApiResponse<DeletedView>>
where
    R: CatalogRepository,
{
    let resource_id: ResourceId = parse_id(&id)?;
    let parent_id: CommentId = parse_id(&comment_id)?;
    let reply_id: CommentId = parse_id(&query.reply_id)?;
    let deleted = CommentUseCase::new(app.repo.clone())
        .delete(&user, kind, &resource_id, &reply_id, Some(&parent_id))
        .await?;

    Ok(ApiResponse::with_message(
        "Reply deleted successfully",
        DeletedView { deleted },
    ))
}

// ============================================================================
// User library
// ============================================================================

/// GET /users/collection
pub async fn get_collection<R>(
    State(app): State<CatalogAppState<R>>,
    user: CurrentUser,
) -> CatalogResult<ApiResponse<CollectionView>>
where
    R: CatalogRepository,
{
    let resources = LibraryUseCase::new(app.repo.clone())
        .collection(&user)
        .await?;

    Ok(ApiResponse::success(CollectionView::group(&resources)))
}

/// DELETE /users/collection/{resourceType}/{resourceId}
pub async fn remove_collection<R>(
    State(app): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path((resource_type, id)): Path<(String, String)>,
) -> CatalogResult<ApiResponse<CollectionView>>
where
    R: CatalogRepository,
{
    let kind = parse_kind(&resource_type)?;
    let resource_id: ResourceId = parse_id(&id)?;
    let remaining = LibraryUseCase::new(app.repo.clone())
        .uncollect(&user, kind, &resource_id)
        .await?;

    Ok(ApiResponse::with_message(
        "Removed from collection",
        CollectionView::group(&remaining),
    ))
}

/// GET /users/summit
pub async fn get_submissions<R>(
    State(app): State<CatalogAppState<R>>,
    user: CurrentUser,
) -> CatalogResult<ApiResponse<Vec<ReviewRecordView>>>
where
    R: CatalogRepository,
{
    let submissions = LibraryUseCase::new(app.repo.clone())
        .submissions(&user)
        .await?;

    Ok(ApiResponse::success(
        submissions.iter().map(ReviewRecordView::from).collect(),
    ))
}

/// GET /users/status
pub async fn get_status<R>(
    State(app): State<CatalogAppState<R>>,
    user: CurrentUser,
) -> CatalogResult<ApiResponse<Vec<StatusRecordView>>>
where
    R: CatalogRepository,
{
    let records = LibraryUseCase::new(app.repo.clone())
        .status_records(&user)
        .await?;

    Ok(ApiResponse::success(
        records
            .iter()
            .map(|(resource, history)| StatusRecordView::new(resource, history))
            .collect(),
    ))
}

/// PUT /users/status/{resourceType}/{resourceId}/statu
pub async fn change_status<R>(
    State(app): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path((resource_type, id)): Path<(String, String)>,
    JsonOrForm(req): JsonOrForm<StatusActionRequest>,
) -> CatalogResult<ApiResponse<TransitionView>>
where
    R: CatalogRepository,
{
    let kind = parse_kind(&resource_type)?;
    let resource_id: ResourceId = parse_id(&id)?;
    let action = OwnerAction::parse(&req.action).ok_or_else(|| CatalogError::InvalidInput {
        message: format!("Unknown status action: {}", req.action.trim()),
        action: Some("Use withdraw or resubmit".to_owned()),
    })?;

    let transition = LibraryUseCase::new(app.repo.clone())
        .change_status(&user, kind, &resource_id, action)
        .await?;

    Ok(ApiResponse::with_message(
        "Status updated successfully",
        TransitionView::from(&transition),
    ))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /admin/pending?type&cursor&limit&sort
pub async fn get_pending<R>(
    State(app): State<CatalogAppState<R>>,
    QueryParams(query): QueryParams<PendingQuery>,
) -> CatalogResult<Json<PendingResponse>>
where
    R: CatalogRepository,
{
    let page = PageRequest::parse(query.cursor.as_deref(), query.limit.as_deref());
    let pending = GetPendingUseCase::new(app.repo.clone())
        .execute(
            query.item_type.as_deref().unwrap_or_default(),
            page,
            query.sort.as_deref(),
        )
        .await?;

    Ok(Json(pending.into()))
}

/// POST /admin/review/{itemId}
pub async fn review_item<R>(
    State(app): State<CatalogAppState<R>>,
    admin: CurrentUser,
    Path(item_id): Path<String>,
    JsonOrForm(req): JsonOrForm<ReviewRequest>,
) -> CatalogResult<ApiResponse<TransitionView>>
where
    R: CatalogRepository,
{
    let transition = ReviewItemUseCase::new(app.repo.clone())
        .execute(
            &admin,
            ReviewInput {
                item_id,
                action: req.action,
                reject_reason: req.reject_reason,
            },
        )
        .await?;

    Ok(ApiResponse::with_message(
        "Review completed successfully",
        TransitionView::from(&transition),
    ))
}
