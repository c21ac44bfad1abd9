// src/infrastructure/repositories/postgres_post_version.rs
use super::map_sqlx;
use super::rows::{ACTION_COLUMNS, PostVersionActionRow, PostVersionRow, VERSION_COLUMNS, collect};
use crate::domain::errors::DomainResult;
use crate::domain::post::PostId;
use crate::domain::post_version::{
    PostVersion, PostVersionAction, PostVersionFilter, PostVersionId, PostVersionReadRepository,
    PostVersionStatus,
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresPostVersionReadRepository {
    pool: PgPool,
}

impl PostgresPostVersionReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostVersionReadRepository for PostgresPostVersionReadRepository {
    async fn find_by_id(&self, id: PostVersionId) -> DomainResult<Option<PostVersion>> {
        let row = sqlx::query_as::<_, PostVersionRow>(&format!(
            "SELECT {VERSION_COLUMNS} FROM post_versions WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(PostVersion::try_from).transpose()
    }

    async fn list(&self, filter: PostVersionFilter) -> DomainResult<Vec<PostVersion>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {VERSION_COLUMNS} FROM post_versions WHERE status = "
        ));
        builder.push_bind(filter.status.as_i16());

        if let Some(author_id) = filter.author_id {
            builder.push(" AND author_id = ");
            builder.push_bind(i64::from(author_id));
        }

        if filter.oldest_first {
            builder.push(" ORDER BY updated_at ASC, id ASC");
        } else {
            builder.push(" ORDER BY updated_at DESC, id DESC");
        }
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(filter.limit));

        let rows = builder
            .build_query_as::<PostVersionRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        collect(rows)
    }

    async fn find_current_for_post(&self, post_id: PostId) -> DomainResult<Option<PostVersion>> {
        let row = sqlx::query_as::<_, PostVersionRow>(&format!(
            "SELECT {VERSION_COLUMNS} FROM post_versions
             WHERE post_id = $1 AND status = $2
             ORDER BY id DESC
             LIMIT 1"
        ))
        .bind(i64::from(post_id))
        .bind(PostVersionStatus::Accepted.as_i16())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(PostVersion::try_from).transpose()
    }

    async fn list_current_for_posts(&self, post_ids: &[PostId]) -> DomainResult<Vec<PostVersion>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = post_ids.iter().copied().map(i64::from).collect();

        let rows = sqlx::query_as::<_, PostVersionRow>(&format!(
            "SELECT DISTINCT ON (post_id) {VERSION_COLUMNS} FROM post_versions
             WHERE post_id = ANY($1) AND status = $2
             ORDER BY post_id, id DESC"
        ))
        .bind(ids)
        .bind(PostVersionStatus::Accepted.as_i16())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        collect(rows)
    }

    async fn list_actions(&self, id: PostVersionId) -> DomainResult<Vec<PostVersionAction>> {
        let rows = sqlx::query_as::<_, PostVersionActionRow>(&format!(
            "SELECT {ACTION_COLUMNS} FROM post_version_actions
             WHERE post_version_id = $1
             ORDER BY id ASC"
        ))
        .bind(i64::from(id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        collect(rows)
    }
}
