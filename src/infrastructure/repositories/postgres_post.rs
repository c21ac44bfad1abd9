use super::map_sqlx;
use super::rows::{POST_COLUMNS, PostRow, collect};
use crate::domain::errors::DomainResult;
use crate::domain::post::{Post, PostFilter, PostId, PostReadRepository, PostSlug};
use crate::domain::post_version::PostVersionStatus;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresPostReadRepository {
    pool: PgPool,
}

impl PostgresPostReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostReadRepository for PostgresPostReadRepository {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Post::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Post::try_from).transpose()
    }

    async fn list(&self, filter: PostFilter) -> DomainResult<Vec<Post>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {POST_COLUMNS} FROM posts p WHERE TRUE"));

        if let Some(category_id) = filter.category_id {
            builder.push(
                " AND EXISTS (SELECT 1 FROM post_versions cur
                   WHERE cur.id = (SELECT MAX(v.id) FROM post_versions v
                                   WHERE v.post_id = p.id AND v.status = ",
            );
            builder.push_bind(PostVersionStatus::Accepted.as_i16());
            builder.push(") AND cur.category_id = ");
            builder.push_bind(i64::from(category_id));
            builder.push(")");
        }

        if let Some(author_id) = filter.author_id {
            builder.push(
                " AND EXISTS (SELECT 1 FROM post_versions a
                   WHERE a.post_id = p.id AND a.author_id = ",
            );
            builder.push_bind(i64::from(author_id));
            builder.push(")");
        }

        builder.push(" ORDER BY p.updated_at DESC, p.id DESC LIMIT ");
        builder.push_bind(i64::from(filter.limit));

        let rows = builder
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        collect(rows)
    }
}
