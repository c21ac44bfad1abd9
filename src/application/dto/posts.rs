use crate::domain::post::Post;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{post_versions::PostVersionDto, serde_time};

/// A published post as readers see it: the slug plus its current accepted
/// version.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostDto {
    pub id: i64,
    pub slug: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
    pub current_version: PostVersionDto,
}

impl PostDto {
    pub fn from_parts(post: Post, current_version: PostVersionDto) -> Self {
        Self {
            id: post.id.into(),
            slug: post.slug.into_inner(),
            created_at: post.created_at,
            updated_at: post.updated_at,
            current_version,
        }
    }
}
