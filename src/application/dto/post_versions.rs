use crate::domain::post_version::{
    PostVersion, PostVersionAction, PostVersionActionType, PostVersionStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostVersionDto {
    pub id: i64,
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub author_id: Option<i64>,
    /// Only present for reviewers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_moderator_id: Option<i64>,
    pub category_id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
    pub cover: String,
    pub status: PostVersionStatus,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl PostVersionDto {
    /// Project a version for a viewer; non-reviewers do not learn who is
    /// handling the submission.
    pub fn for_viewer(version: PostVersion, reviewer: bool) -> Self {
        let mut dto = Self::from(version);
        if !reviewer {
            dto.assigned_moderator_id = None;
        }
        dto
    }
}

impl From<PostVersion> for PostVersionDto {
    fn from(version: PostVersion) -> Self {
        Self {
            id: version.id.into(),
            post_id: version.post_id.map(Into::into),
            author_id: version.author_id.map(Into::into),
            assigned_moderator_id: version.assigned_moderator_id.map(Into::into),
            category_id: version.category_id.into(),
            title: version.title.into_inner(),
            description: version.description.into_inner(),
            content: version.content.into_inner(),
            cover: version.cover.into_inner(),
            status: version.status,
            created_at: version.created_at,
            updated_at: version.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostVersionActionDto {
    pub id: i64,
    #[serde(rename = "type")]
    pub action_type: PostVersionActionType,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[schema(value_type = Object)]
    pub details: Value,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<PostVersionAction> for PostVersionActionDto {
    fn from(action: PostVersionAction) -> Self {
        let details = action.kind.details();
        Self {
            id: action.id.into(),
            action_type: action.kind.action_type(),
            user_id: action.user_id.map(Into::into),
            details,
            created_at: action.created_at,
        }
    }
}

/// A version together with the part of its review log the viewer may see.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostVersionDetailDto {
    #[serde(flatten)]
    pub version: PostVersionDto,
    pub actions: Vec<PostVersionActionDto>,
}
