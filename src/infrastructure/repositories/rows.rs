//! Row shapes shared by the read repositories and the workflow transaction.

use crate::domain::category::CategoryId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::{Post, PostId, PostSlug};
use crate::domain::post_version::{
    CoverPath, PostVersion, PostVersionAction, PostVersionActionId, PostVersionActionKind,
    PostVersionActionType, PostVersionContent, PostVersionDescription, PostVersionId,
    PostVersionStatus, PostVersionTitle,
};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;

pub(super) const VERSION_COLUMNS: &str = "id, post_id, author_id, assigned_moderator_id, category_id, \
     title, description, content, cover, status, created_at, updated_at";

pub(super) const ACTION_COLUMNS: &str = "id, post_version_id, user_id, type, details, created_at";

pub(super) const POST_COLUMNS: &str = "id, slug, created_at, updated_at";

#[derive(Debug, FromRow)]
pub(super) struct PostVersionRow {
    id: i64,
    post_id: Option<i64>,
    author_id: Option<i64>,
    assigned_moderator_id: Option<i64>,
    category_id: i64,
    title: String,
    description: String,
    content: String,
    cover: String,
    status: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostVersionRow> for PostVersion {
    type Error = DomainError;

    fn try_from(row: PostVersionRow) -> Result<Self, Self::Error> {
        Ok(PostVersion {
            id: PostVersionId::new(row.id)?,
            post_id: row.post_id.map(PostId::new).transpose()?,
            author_id: row.author_id.map(UserId::new).transpose()?,
            assigned_moderator_id: row.assigned_moderator_id.map(UserId::new).transpose()?,
            category_id: CategoryId::new(row.category_id)?,
            title: PostVersionTitle::new(row.title)?,
            description: PostVersionDescription::new(row.description)?,
            content: PostVersionContent::new(row.content)?,
            cover: CoverPath::new(row.cover)?,
            status: PostVersionStatus::try_from(row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct PostVersionActionRow {
    id: i64,
    post_version_id: i64,
    user_id: Option<i64>,
    #[sqlx(rename = "type")]
    action_type: i16,
    details: Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<PostVersionActionRow> for PostVersionAction {
    type Error = DomainError;

    fn try_from(row: PostVersionActionRow) -> Result<Self, Self::Error> {
        let action_type = PostVersionActionType::try_from(row.action_type)?;
        Ok(PostVersionAction {
            id: PostVersionActionId(row.id),
            version_id: PostVersionId::new(row.post_version_id)?,
            user_id: row.user_id.map(UserId::new).transpose()?,
            kind: PostVersionActionKind::from_stored(action_type, row.details)?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct PostRow {
    id: i64,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: PostId::new(row.id)?,
            slug: PostSlug::new(row.slug)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub(super) fn collect<R, T>(rows: Vec<R>) -> DomainResult<Vec<T>>
where
    T: TryFrom<R, Error = DomainError>,
{
    rows.into_iter().map(T::try_from).collect()
}
