// src/domain/post/entity.rs
use crate::domain::post::value_objects::{PostId, PostSlug};
use chrono::{DateTime, Utc};

/// A published article. Content lives in its accepted post versions; the post
/// itself only carries the public slug and timestamps.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub slug: PostSlug,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub slug: PostSlug,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn new(slug: PostSlug, created_at: DateTime<Utc>) -> Self {
        Self { slug, created_at }
    }
}
