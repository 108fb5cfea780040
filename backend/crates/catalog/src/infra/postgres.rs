//! PostgreSQL Repository Implementation
//!
//! Family-specific fields are stored as a tagged JSONB document in
//! `resources.details`; everything that is filtered or sorted on has its
//! own column.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, ResourceId, UserId};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{
    comment::{Author, Comment},
    resource::{AuditState, Engagement, Material, Resource, ResourceDetails},
    transition::StatusTransition,
};
use crate::domain::repository::{
    AuthorDirectory, CommentRepository, EngagementRepository, EngagementState, ResourceRepository,
    ReviewRepository, ViewerFlags,
};
use crate::domain::value_object::{
    audit_status::AuditStatus,
    listing::{ResourcePage, ResourceQuery, SortKey},
    resource_kind::ResourceKind,
};
use crate::error::{CatalogError, CatalogResult};

const RESOURCE_COLUMNS: &str = r#"
    resource_id,
    kind,
    owner_id,
    owner_name,
    name,
    description,
    category,
    tags,
    images,
    contributors,
    views,
    likes,
    collections,
    audit_status,
    submitted_at,
    audited_at,
    reject_reason,
    details,
    created_at,
    updated_at
"#;

const COMMENT_COLUMNS: &str = r#"
    comment_id,
    resource_id,
    parent_id,
    author_id,
    author_nickname,
    author_avatar,
    body,
    like_count,
    created_at
"#;

/// PostgreSQL-backed catalog store
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or delete a flag row and move the counter in one transaction
    async fn set_flag(
        &self,
        flag: Flag,
        resource_id: &ResourceId,
        user_id: &UserId,
        active: bool,
    ) -> CatalogResult<EngagementState> {
        let (table, column) = (flag.table(), flag.counter());

        let toggle_sql = if active {
            format!(
                "INSERT INTO {table} (resource_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING"
            )
        } else {
            format!("DELETE FROM {table} WHERE resource_id = $1 AND user_id = $2")
        };
        let bump_sql = format!(
            "UPDATE resources SET {column} = GREATEST({column} + $2, 0) \
             WHERE resource_id = $1 RETURNING {column}"
        );
        let read_sql = format!("SELECT {column} FROM resources WHERE resource_id = $1");

        let mut tx = self.pool.begin().await?;

        let changed = sqlx::query(&toggle_sql)
            .bind(resource_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        let count = if changed {
            sqlx::query_scalar::<_, i64>(&bump_sql)
                .bind(resource_id.as_uuid())
                .bind(if active { 1_i64 } else { -1_i64 })
                .fetch_one(&mut *tx)
                .await?
        } else {
            sqlx::query_scalar::<_, i64>(&read_sql)
                .bind(resource_id.as_uuid())
                .fetch_one(&mut *tx)
                .await?
        };

        tx.commit().await?;

        Ok(EngagementState { active, count })
    }
}

#[derive(Debug, Clone, Copy)]
enum Flag {
    Like,
    Collection,
}

impl Flag {
    fn table(self) -> &'static str {
        match self {
            Flag::Like => "resource_likes",
            Flag::Collection => "resource_collections",
        }
    }

    fn counter(self) -> &'static str {
        match self {
            Flag::Like => "likes",
            Flag::Collection => "collections",
        }
    }
}

/// Escape `%`, `_` and `\` for a LIKE pattern
fn like_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// WHERE clause shared by the page and count queries
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ResourceQuery) {
    let filter = &query.filter;

    qb.push(" WHERE kind = ")
        .push_bind(query.kind.code())
        .push(" AND audit_status = ")
        .push_bind(query.status.code());

    if !filter.categories.is_empty() {
        qb.push(" AND category = ANY(")
            .push_bind(filter.categories.clone())
            .push(")");
    }
    if !filter.tags.is_empty() {
        qb.push(" AND tags @> ").push_bind(filter.tags.clone());
    }
    if let Some(semester) = &filter.semester {
        qb.push(" AND details->>'semester' = ")
            .push_bind(semester.clone());
    }
    if let Some(keyword) = &filter.keyword {
        let pattern = like_pattern(keyword);
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE ")
            .push_bind(pattern)
            .push("))");
    }
}

fn order_by(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Latest => " ORDER BY created_at DESC, resource_id ASC",
        SortKey::Oldest => " ORDER BY created_at ASC, resource_id ASC",
        SortKey::Views => " ORDER BY views DESC, created_at DESC, resource_id ASC",
        SortKey::Likes => " ORDER BY likes DESC, created_at DESC, resource_id ASC",
        SortKey::Collections => " ORDER BY collections DESC, created_at DESC, resource_id ASC",
    }
}

// ============================================================================
// Resource Repository Implementation
// ============================================================================

impl ResourceRepository for PgCatalogRepository {
    async fn create_resource(&self, resource: &Resource) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO resources (
                resource_id,
                kind,
                owner_id,
                owner_name,
                name,
                description,
                category,
                tags,
                images,
                contributors,
                views,
                likes,
                collections,
                audit_status,
                submitted_at,
                audited_at,
                reject_reason,
                details,
                created_at,
                updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
            )
            "#,
        )
        .bind(resource.resource_id.as_uuid())
        .bind(resource.kind().code())
        .bind(resource.owner_id.as_uuid())
        .bind(&resource.owner_name)
        .bind(&resource.name)
        .bind(&resource.description)
        .bind(&resource.category)
        .bind(&resource.tags)
        .bind(&resource.images)
        .bind(&resource.contributors)
        .bind(resource.stats.views)
        .bind(resource.stats.likes)
        .bind(resource.stats.collections)
        .bind(resource.audit.status.code())
        .bind(resource.audit.submitted_at)
        .bind(resource.audit.audited_at)
        .bind(&resource.audit.reject_reason)
        .bind(Json(&resource.details))
        .bind(resource.created_at)
        .bind(resource.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_resource(&self, resource_id: &ResourceId) -> CatalogResult<Option<Resource>> {
        let sql = format!("SELECT {RESOURCE_COLUMNS} FROM resources WHERE resource_id = $1");
        let row = sqlx::query_as::<_, ResourceRow>(&sql)
            .bind(resource_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(ResourceRow::into_resource).transpose()
    }

    async fn update_resource(&self, resource: &Resource) -> CatalogResult<()> {
        sqlx::query(
            r#"
            UPDATE resources SET
                name = $2,
                description = $3,
                category = $4,
                tags = $5,
                images = $6,
                contributors = $7,
                details = $8,
                updated_at = $9
            WHERE resource_id = $1
            "#,
        )
        .bind(resource.resource_id.as_uuid())
        .bind(&resource.name)
        .bind(&resource.description)
        .bind(&resource.category)
        .bind(&resource.tags)
        .bind(&resource.images)
        .bind(&resource.contributors)
        .bind(Json(&resource.details))
        .bind(resource.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn append_material(
        &self,
        course_id: &ResourceId,
        material: &Material,
    ) -> CatalogResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE resources SET
                details = jsonb_set(
                    details,
                    '{materials}',
                    COALESCE(details->'materials', '[]'::jsonb) || jsonb_build_array($2::jsonb)
                ),
                contributors = CASE
                    WHEN $3 = ANY(contributors) THEN contributors
                    ELSE array_append(contributors, $3)
                END,
                updated_at = $4
            WHERE resource_id = $1 AND kind = 'course'
            "#,
        )
        .bind(course_id.as_uuid())
        .bind(Json(material))
        .bind(&material.uploader)
        .bind(material.uploaded_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_resources(&self, query: &ResourceQuery) -> CatalogResult<ResourcePage> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM resources");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut page_qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {RESOURCE_COLUMNS} FROM resources"));
        push_filters(&mut page_qb, query);
        page_qb
            .push(order_by(query.sort))
            .push(" LIMIT ")
            .push_bind(query.page.limit as i64)
            .push(" OFFSET ")
            .push_bind(query.page.offset as i64);

        let rows: Vec<ResourceRow> = page_qb.build_query_as().fetch_all(&self.pool).await?;

        Ok(ResourcePage {
            items: rows
                .into_iter()
                .map(ResourceRow::into_resource)
                .collect::<CatalogResult<_>>()?,
            total: total.max(0) as u64,
        })
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> CatalogResult<Vec<Resource>> {
        let sql = format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources WHERE owner_id = $1 \
             ORDER BY created_at DESC, resource_id ASC"
        );
        let rows = sqlx::query_as::<_, ResourceRow>(&sql)
            .bind(owner_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ResourceRow::into_resource).collect()
    }

    async fn increment_views(&self, resource_id: &ResourceId) -> CatalogResult<Option<i64>> {
        let views = sqlx::query_scalar::<_, i64>(
            "UPDATE resources SET views = views + 1 WHERE resource_id = $1 RETURNING views",
        )
        .bind(resource_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(views)
    }
}

// ============================================================================
// Engagement Repository Implementation
// ============================================================================

impl EngagementRepository for PgCatalogRepository {
    async fn set_liked(
        &self,
        resource_id: &ResourceId,
        user_id: &UserId,
        liked: bool,
    ) -> CatalogResult<EngagementState> {
        self.set_flag(Flag::Like, resource_id, user_id, liked).await
    }

    async fn set_collected(
        &self,
        resource_id: &ResourceId,
        user_id: &UserId,
        collected: bool,
    ) -> CatalogResult<EngagementState> {
        self.set_flag(Flag::Collection, resource_id, user_id, collected)
            .await
    }

    async fn viewer_flags(
        &self,
        resource_id: &ResourceId,
        user_id: &UserId,
    ) -> CatalogResult<ViewerFlags> {
        let (liked, collected) = sqlx::query_as::<_, (bool, bool)>(
            r#"
            SELECT
                EXISTS(SELECT 1 FROM resource_likes WHERE resource_id = $1 AND user_id = $2),
                EXISTS(SELECT 1 FROM resource_collections WHERE resource_id = $1 AND user_id = $2)
            "#,
        )
        .bind(resource_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(ViewerFlags { liked, collected })
    }

    async fn list_collected(&self, user_id: &UserId) -> CatalogResult<Vec<Resource>> {
        let sql = format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources \
             JOIN resource_collections USING (resource_id) \
             WHERE user_id = $1 \
             ORDER BY collected_at DESC, resource_id ASC"
        );
        let rows = sqlx::query_as::<_, ResourceRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ResourceRow::into_resource).collect()
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgCatalogRepository {
    async fn create_comment(&self, comment: &Comment) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id,
                resource_id,
                parent_id,
                author_id,
                author_nickname,
                author_avatar,
                body,
                like_count,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.resource_id.as_uuid())
        .bind(comment.parent_id.map(|p| p.into_uuid()))
        .bind(comment.author_id.as_uuid())
        .bind(&comment.author.nickname)
        .bind(&comment.author.avatar)
        .bind(&comment.body)
        .bind(comment.like_count)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_comment(&self, comment_id: &CommentId) -> CatalogResult<Option<Comment>> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE comment_id = $1");
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(comment_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn list_comments(&self, resource_id: &ResourceId) -> CatalogResult<Vec<Comment>> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE resource_id = $1 \
             ORDER BY created_at ASC, comment_id ASC"
        );
        let rows = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(resource_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn count_comments(
        &self,
        resource_ids: &[ResourceId],
    ) -> CatalogResult<HashMap<ResourceId, i64>> {
        let ids: Vec<Uuid> = resource_ids.iter().map(|id| id.into_uuid()).collect();
        let rows = sqlx::query_as::<_, (Uuid, i64)>(
            "SELECT resource_id, COUNT(*) FROM comments \
             WHERE resource_id = ANY($1) GROUP BY resource_id",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, count)| (ResourceId::from_uuid(id), count))
            .collect())
    }

    async fn delete_comment(&self, comment_id: &CommentId) -> CatalogResult<u64> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1 OR parent_id = $1")
            .bind(comment_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

// ============================================================================
// Review Repository Implementation
// ============================================================================

impl ReviewRepository for PgCatalogRepository {
    async fn apply_transition(
        &self,
        resource: &Resource,
        transition: &StatusTransition,
    ) -> CatalogResult<()> {
        let mut tx = self.pool.begin().await?;

        let applied = sqlx::query(
            r#"
            UPDATE resources SET
                audit_status = $2,
                submitted_at = $3,
                audited_at = $4,
                reject_reason = $5,
                updated_at = $6
            WHERE resource_id = $1 AND audit_status = $7
            "#,
        )
        .bind(resource.resource_id.as_uuid())
        .bind(resource.audit.status.code())
        .bind(resource.audit.submitted_at)
        .bind(resource.audit.audited_at)
        .bind(&resource.audit.reject_reason)
        .bind(resource.updated_at)
        .bind(transition.old_status.code())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if applied == 0 {
            let current = sqlx::query_scalar::<_, String>(
                "SELECT audit_status FROM resources WHERE resource_id = $1",
            )
            .bind(resource.resource_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?;

            return match current {
                Some(code) => Err(transition.conflict(parse_status(&code)?)),
                None => Err(CatalogError::ResourceNotFound(resource.kind())),
            };
        }

        sqlx::query(
            r#"
            INSERT INTO status_transitions (
                resource_id,
                kind,
                old_status,
                new_status,
                operator,
                reason,
                operated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(transition.resource_id.as_uuid())
        .bind(transition.kind.code())
        .bind(transition.old_status.code())
        .bind(transition.new_status.code())
        .bind(&transition.operator)
        .bind(&transition.reason)
        .bind(transition.operated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn list_transitions(
        &self,
        resource_id: &ResourceId,
    ) -> CatalogResult<Vec<StatusTransition>> {
        let rows = sqlx::query_as::<_, TransitionRow>(
            r#"
            SELECT
                resource_id,
                kind,
                old_status,
                new_status,
                operator,
                reason,
                operated_at
            FROM status_transitions
            WHERE resource_id = $1
            ORDER BY operated_at ASC, transition_id ASC
            "#,
        )
        .bind(resource_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TransitionRow::into_transition).collect()
    }
}

impl AuthorDirectory for PgCatalogRepository {
    async fn find_author(&self, user_id: &UserId) -> CatalogResult<Option<Author>> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT nickname, avatar FROM users WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(nickname, avatar)| Author { nickname, avatar }))
    }
}

// ============================================================================
// Row Types
// ============================================================================

fn parse_status(code: &str) -> CatalogResult<AuditStatus> {
    AuditStatus::from_code(code)
        .ok_or_else(|| CatalogError::Internal(format!("Invalid audit_status: {code}")))
}

fn parse_kind(code: &str) -> CatalogResult<ResourceKind> {
    ResourceKind::parse(code).ok_or_else(|| CatalogError::Internal(format!("Invalid kind: {code}")))
}

#[derive(sqlx::FromRow)]
struct ResourceRow {
    resource_id: Uuid,
    kind: String,
    owner_id: Uuid,
    owner_name: String,
    name: String,
    description: String,
    category: String,
    tags: Vec<String>,
    images: Vec<String>,
    contributors: Vec<String>,
    views: i64,
    likes: i64,
    collections: i64,
    audit_status: String,
    submitted_at: DateTime<Utc>,
    audited_at: Option<DateTime<Utc>>,
    reject_reason: Option<String>,
    details: Json<ResourceDetails>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ResourceRow {
    fn into_resource(self) -> CatalogResult<Resource> {
        let details = self.details.0;
        if parse_kind(&self.kind)? != details.kind() {
            return Err(CatalogError::Internal(format!(
                "Resource {} has kind {} but {} details",
                self.resource_id,
                self.kind,
                details.kind()
            )));
        }

        Ok(Resource {
            resource_id: ResourceId::from_uuid(self.resource_id),
            owner_id: UserId::from_uuid(self.owner_id),
            owner_name: self.owner_name,
            name: self.name,
            description: self.description,
            category: self.category,
            tags: self.tags,
            images: self.images,
            contributors: self.contributors,
            stats: Engagement {
                views: self.views,
                likes: self.likes,
                collections: self.collections,
            },
            audit: AuditState {
                status: parse_status(&self.audit_status)?,
                submitted_at: self.submitted_at,
                audited_at: self.audited_at,
                reject_reason: self.reject_reason,
            },
            details,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    resource_id: Uuid,
    parent_id: Option<Uuid>,
    author_id: Uuid,
    author_nickname: String,
    author_avatar: String,
    body: String,
    like_count: i64,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.comment_id),
            resource_id: ResourceId::from_uuid(self.resource_id),
            parent_id: self.parent_id.map(CommentId::from_uuid),
            author_id: UserId::from_uuid(self.author_id),
            author: Author {
                nickname: self.author_nickname,
                avatar: self.author_avatar,
            },
            body: self.body,
            like_count: self.like_count,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TransitionRow {
    resource_id: Uuid,
    kind: String,
    old_status: String,
    new_status: String,
    operator: String,
    reason: Option<String>,
    operated_at: DateTime<Utc>,
}

impl TransitionRow {
    fn into_transition(self) -> CatalogResult<StatusTransition> {
        Ok(StatusTransition {
            resource_id: ResourceId::from_uuid(self.resource_id),
            kind: parse_kind(&self.kind)?,
            old_status: parse_status(&self.old_status)?,
            new_status: parse_status(&self.new_status)?,
            operator: self.operator,
            reason: self.reason,
            operated_at: self.operated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%_a\\b"), "%100\\%\\_a\\\\b%");
    }

    #[test]
    fn test_filters_sql() {
        let mut query = ResourceQuery::public(ResourceKind::Course);
        query.filter.tags = vec!["os".into()];
        query.filter.semester = Some("2024-fall".into());

        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM resources");
        push_filters(&mut qb, &query);
        let sql = qb.sql();

        assert!(sql.contains("kind = $1 AND audit_status = $2"));
        assert!(sql.contains("tags @> $3"));
        assert!(sql.contains("details->>'semester' = $4"));
        assert!(!sql.contains("ILIKE"));
    }
}
