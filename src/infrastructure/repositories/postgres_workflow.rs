// src/infrastructure/repositories/postgres_workflow.rs
use super::map_sqlx;
use super::rows::{
    ACTION_COLUMNS, POST_COLUMNS, PostRow, PostVersionActionRow, PostVersionRow, VERSION_COLUMNS,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::{NewPost, Post, PostId, PostSlug};
use crate::domain::post_version::{
    NewPostVersion, NewPostVersionAction, PostVersion, PostVersionAction, PostVersionId,
    WorkflowStore, WorkflowTransaction,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

/// Opens one database transaction per workflow step.
#[derive(Clone)]
pub struct PostgresWorkflowStore {
    pool: PgPool,
}

impl PostgresWorkflowStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkflowStore for PostgresWorkflowStore {
    async fn begin(&self) -> DomainResult<Box<dyn WorkflowTransaction>> {
        let tx = self.pool.begin().await.map_err(map_sqlx)?;
        Ok(Box::new(PostgresWorkflowTransaction { tx }))
    }
}

/// Rolled back by sqlx when dropped without `commit`.
pub struct PostgresWorkflowTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl WorkflowTransaction for PostgresWorkflowTransaction {
    async fn lock_version(&mut self, id: PostVersionId) -> DomainResult<Option<PostVersion>> {
        let row = sqlx::query_as::<_, PostVersionRow>(&format!(
            "SELECT {VERSION_COLUMNS} FROM post_versions WHERE id = $1 FOR UPDATE"
        ))
        .bind(i64::from(id))
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;

        row.map(PostVersion::try_from).transpose()
    }

    async fn insert_version(&mut self, version: NewPostVersion) -> DomainResult<PostVersion> {
        let NewPostVersion {
            author_id,
            category_id,
            title,
            description,
            content,
            cover,
            status,
            created_at,
        } = version;

        let row = sqlx::query_as::<_, PostVersionRow>(&format!(
            "INSERT INTO post_versions
                (author_id, category_id, title, description, content, cover, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING {VERSION_COLUMNS}"
        ))
        .bind(i64::from(author_id))
        .bind(i64::from(category_id))
        .bind(title.as_str())
        .bind(description.as_str())
        .bind(content.as_str())
        .bind(cover.as_str())
        .bind(status.as_i16())
        .bind(created_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;

        PostVersion::try_from(row)
    }

    async fn save_version(&mut self, version: &PostVersion) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE post_versions SET
                post_id = $2,
                assigned_moderator_id = $3,
                category_id = $4,
                title = $5,
                description = $6,
                content = $7,
                cover = $8,
                status = $9,
                updated_at = $10
             WHERE id = $1",
        )
        .bind(i64::from(version.id))
        .bind(version.post_id.map(i64::from))
        .bind(version.assigned_moderator_id.map(i64::from))
        .bind(i64::from(version.category_id))
        .bind(version.title.as_str())
        .bind(version.description.as_str())
        .bind(version.content.as_str())
        .bind(version.cover.as_str())
        .bind(version.status.as_i16())
        .bind(version.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!(
                "post version {} not found",
                version.id
            )));
        }
        Ok(())
    }

    async fn find_post_by_slug(&mut self, slug: &PostSlug) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;

        row.map(Post::try_from).transpose()
    }

    async fn insert_post(&mut self, post: NewPost) -> DomainResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO posts (slug, created_at, updated_at)
             VALUES ($1, $2, $2)
             RETURNING {POST_COLUMNS}"
        ))
        .bind(post.slug.as_str())
        .bind(post.created_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;

        Post::try_from(row)
    }

    async fn touch_post(&mut self, id: PostId, now: DateTime<Utc>) -> DomainResult<()> {
        let result = sqlx::query("UPDATE posts SET updated_at = $2 WHERE id = $1")
            .bind(i64::from(id))
            .bind(now)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!(
                "post {} not found",
                i64::from(id)
            )));
        }
        Ok(())
    }

    async fn append_action(
        &mut self,
        action: NewPostVersionAction,
    ) -> DomainResult<PostVersionAction> {
        let row = sqlx::query_as::<_, PostVersionActionRow>(&format!(
            "INSERT INTO post_version_actions (post_version_id, user_id, type, details, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ACTION_COLUMNS}"
        ))
        .bind(i64::from(action.version_id))
        .bind(action.user_id.map(i64::from))
        .bind(action.kind.action_type().as_i16())
        .bind(action.kind.details())
        .bind(action.created_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;

        PostVersionAction::try_from(row)
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.tx.commit().await.map_err(map_sqlx)
    }
}
